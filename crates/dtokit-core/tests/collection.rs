//! Integration tests for typed collection coercion.

use dtokit_core::{
    field, record, schema, BindingError, Collection, Construction, Container, ContainerConfig,
    Element, Entity, Error, Instance, Instantiable, Makeable, Object, Record, Schema, Value,
};
use pretty_assertions::assert_eq;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Default)]
struct Point {
    x: i64,
    y: i64,
}

impl Entity for Point {
    fn schema() -> &'static Schema<Self> {
        schema!(Point { field!(Point, x: i64), field!(Point, y: i64) })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Shape {
    dims: Collection<Point>,
}

impl Entity for Shape {
    fn schema() -> &'static Schema<Self> {
        schema!(Shape { field!(Shape, dims: Collection<Point>) })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Marker {
    x: i64,
    y: i64,
    label: Option<String>,
}

impl Entity for Marker {
    fn schema() -> &'static Schema<Self> {
        schema!(Marker {
            field!(Marker, x: i64),
            field!(Marker, y: i64),
            field!(Marker, label: Option<String>).defaulted(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Stranger;

impl Object for Stranger {}

#[derive(Debug, Clone, PartialEq)]
struct PlainRow(Record);

impl Object for PlainRow {
    fn plain_record(&self) -> Option<Record> {
        Some(self.0.clone())
    }
}

fn point_records() -> Vec<Value> {
    vec![
        Value::Record(record! { "x" => 1, "y" => 2 }),
        Value::Record(record! { "x" => 3, "y" => 4 }),
    ]
}

#[test]
fn test_entity_with_collection_field() {
    let factory = Container::new();
    let shape = Shape::make(record! { "dims" => point_records() }, &factory).unwrap();

    assert_eq!(shape.dims.len(), 2);
    assert_eq!(
        shape.dims.items().cloned().collect::<Vec<_>>(),
        vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]
    );

    let mapped = shape.dims.clone().map_into::<Point>(&factory).unwrap();
    assert_eq!(mapped, shape.dims);
}

#[test]
fn test_plain_structure_round_trip() {
    let factory = Container::new();
    let shape = Shape::make(record! { "dims" => point_records() }, &factory).unwrap();

    let plain = shape.to_array();
    assert_eq!(plain, record! { "dims" => point_records() });
    assert_eq!(Shape::make(plain, &factory).unwrap(), shape);
}

#[test]
fn test_recoercion_is_identity() {
    let factory = Container::new();
    let points = Collection::<Point>::from_values(point_records(), &factory).unwrap();

    let mut again = Collection::<Point>::new();
    for element in points.clone() {
        again.push(element.into_value(), &factory).unwrap();
    }
    assert_eq!(again, points);
}

#[test]
fn test_every_item_has_the_declared_type() {
    let factory = Container::new();
    let mut points = Collection::<Point>::new();
    points
        .push(record! { "x" => 0, "y" => 0 }, &factory)
        .unwrap()
        .push(Instance::new(Point { x: 1, y: 1 }), &factory)
        .unwrap()
        .push(
            Instance::new(PlainRow(record! { "x" => 2, "y" => 2 })),
            &factory,
        )
        .unwrap()
        .push(Instance::new(Stranger), &factory)
        .unwrap_err();

    assert_eq!(points.len(), 3);
    assert!(points
        .iter()
        .all(|element| matches!(element, Element::Item(Point { .. }))));
}

#[test]
fn test_arrayable_object_is_converted() {
    let factory = Container::new();
    let mut markers = Collection::<Marker>::new();
    markers
        .push(Instance::new(Point { x: 5, y: 6 }), &factory)
        .unwrap();

    assert_eq!(
        markers.items().next(),
        Some(&Marker {
            x: 5,
            y: 6,
            label: None,
        })
    );
}

#[test]
fn test_unsupported_object_is_rejected() {
    let factory = Container::new();
    let err = Collection::<Point>::from_values(
        vec![Value::Object(Instance::new(Stranger))],
        &factory,
    )
    .unwrap_err();

    match err {
        Error::UnsupportedItem { collection, found } => {
            assert!(collection.contains("Collection"));
            assert!(found.ends_with("Stranger"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fake_without_generator() {
    let factory = Container::new();
    let err = Collection::<Point>::fake(3, &factory).unwrap_err();
    assert!(matches!(err, Error::FakeGeneratorRequired { .. }));
    assert!(err.to_string().contains("generator is required"));
}

#[test]
fn test_fake_with_random_generator() {
    let factory = Container::new();
    let mut rng = rand::thread_rng();
    let points = Collection::<Point>::fake_with(
        4,
        || record! { "x" => rng.gen_range(0..10_i64), "y" => rng.gen_range(0..10_i64) },
        &factory,
    )
    .unwrap();

    assert_eq!(points.len(), 4);
    assert!(points.items().all(|p| (0..10).contains(&p.x) && (0..10).contains(&p.y)));
}

#[test]
fn test_map_into_other_entity() {
    let factory = Container::new();
    let points = Collection::<Point>::from_values(point_records(), &factory).unwrap();
    let markers = points.map_into::<Marker>(&factory).unwrap();

    assert_eq!(markers.pluck("x"), vec![Value::Int(1), Value::Int(3)]);
    assert_eq!(markers.pluck("label"), vec![Value::Null, Value::Null]);
}

#[test]
fn test_push_many_from_untyped() {
    let factory = Container::new();
    let mut points = Collection::<Point>::from_values(point_records(), &factory).unwrap();
    let raw = Collection::<Value>::from_values(
        vec![Value::Record(record! { "x" => 9, "y" => 9 })],
        &factory,
    )
    .unwrap();

    points.push_many(raw, &factory).unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points.last(), Some(&Element::Item(Point { x: 9, y: 9 })));

    let bad = Collection::<Value>::from_items(vec![Value::from("nope")]);
    assert!(points.push_many(bad, &factory).is_err());
}

#[test]
fn test_strict_container_errors_propagate() {
    let factory = Container::with_config(ContainerConfig::strict()).register::<Shape>();
    let err = Shape::make(record! { "dims" => point_records() }, &factory).unwrap_err();
    assert!(matches!(
        err,
        Error::Binding(BindingError::Unresolvable { .. })
    ));

    let factory = factory
        .register::<Collection<Point>>()
        .register::<Point>();
    let shape = Shape::make(record! { "dims" => point_records() }, &factory).unwrap();
    assert_eq!(shape.dims.len(), 2);
}

#[test]
fn test_bound_constructor_is_used_for_items() {
    let factory = Container::new().bind::<Point, _>(|args, factory| {
        let mut point = Point::instantiate(args, factory)?;
        point.x *= 10;
        Ok(point)
    });

    let points = Collection::<Point>::from_values(point_records(), &factory).unwrap();
    assert_eq!(points.pluck("x"), vec![Value::Int(10), Value::Int(30)]);
}

#[test]
fn test_construction_override_disables_attributes() {
    let factory = Container::new().register_as::<Point>(Construction::Opaque);
    let err = Collection::<Point>::from_values(point_records(), &factory).unwrap_err();
    assert!(matches!(err, Error::UnsupportedItemType { .. }));
}

#[test]
fn test_makeable_collection() {
    let factory = Container::new();
    let points = Collection::<Point>::makeable(point_records(), &factory).unwrap();
    assert_eq!(points.to_array(), point_records());

    let same =
        Collection::<Point>::makeable(Value::Object(Instance::new(points.clone())), &factory)
            .unwrap();
    assert_eq!(same, points);
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Listing {
    sku: String,
    attributes: Record,
}

impl Entity for Listing {
    fn schema() -> &'static Schema<Self> {
        schema!(Listing {
            field!(Listing, sku: String),
            field!(Listing, attributes: Record),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Draft {
    sku: String,
    attributes: Record,
    note: Option<String>,
}

impl Entity for Draft {
    fn schema() -> &'static Schema<Self> {
        schema!(Draft {
            field!(Draft, sku: String),
            field!(Draft, attributes: Record),
            field!(Draft, note: Option<String>).defaulted(),
        })
    }
}

#[test]
fn test_arrayable_item_with_attributes_field() {
    let factory = Container::new();
    let draft = Draft {
        sku: "a-1".into(),
        attributes: record! { "size" => "m" },
        note: None,
    };

    let mut listings = Collection::<Listing>::new();
    listings.push(Instance::new(draft), &factory).unwrap();

    assert_eq!(
        listings.items().cloned().collect::<Vec<_>>(),
        vec![Listing {
            sku: "a-1".into(),
            attributes: record! { "size" => "m" },
        }]
    );
}

#[test]
fn test_makeable_single_item_list() {
    let factory = Container::new();
    let one = Collection::<Point>::makeable(
        vec![Value::Record(record! { "x" => 1, "y" => 2 })],
        &factory,
    )
    .unwrap();
    assert_eq!(one.items().cloned().collect::<Vec<_>>(), vec![Point { x: 1, y: 2 }]);

    let two = Collection::<Point>::makeable(point_records(), &factory).unwrap();
    assert_eq!(two.len(), 2);
}
