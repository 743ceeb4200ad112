use std::collections::HashSet;
use std::sync::Arc;

use permutable_core::{
    EnumMembers, Error, FieldValue, IntervalRange, PermutationEnum, Result, ValueList,
};
use permutable_generate::{
    Permutable, RecordSchema, RecordSchemaBuilder, generate_permutations_for_type,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
enum Letter {
    #[default]
    A,
    B,
    C,
}

impl PermutationEnum for Letter {
    const NAME: &'static str = "Letter";

    fn members() -> &'static [Self] {
        &[Letter::A, Letter::B, Letter::C]
    }

    fn label(self) -> &'static str {
        match self {
            Letter::A => "a",
            Letter::B => "b",
            Letter::C => "c",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct Foo {
    a: i32,
    b: i32,
    c: i32,
    e: Letter,
}

impl Permutable for Foo {
    fn schema() -> Result<RecordSchema<Self>> {
        RecordSchema::builder("Foo")
            .field("a", IntervalRange::new(1, 1), |foo: &mut Foo, v| foo.a = v)
            .field("b", IntervalRange::new(1, 3), |foo: &mut Foo, v| foo.b = v)
            .field("c", IntervalRange::new(1, 5), |foo: &mut Foo, v| foo.c = v)
            .field("e", EnumMembers::<Letter>::new(), |foo: &mut Foo, v| foo.e = v)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Plain {
    label: String,
    size: u32,
}

impl Default for Plain {
    fn default() -> Self {
        Self {
            label: "fixed".to_string(),
            size: 7,
        }
    }
}

impl Permutable for Plain {
    fn schema() -> Result<RecordSchema<Self>> {
        RecordSchema::builder("Plain")
            .unranged("label")
            .unranged("size")
            .build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Pair {
    first: i64,
    second: i64,
    note: String,
}

fn pair_schema(first: IntervalRange, second: ValueList) -> RecordSchema<Pair> {
    RecordSchema::builder("Pair")
        .field("first", first, |pair: &mut Pair, v| pair.first = v)
        .field("second", second, |pair: &mut Pair, v| pair.second = v)
        .unranged("note")
        .build()
        .expect("pair schema")
}

fn collect<T>(iter: impl Iterator<Item = Result<T>>) -> Vec<T> {
    iter.collect::<Result<Vec<_>>>().expect("permutations succeed")
}

#[test]
fn demo_type_yields_full_product() {
    let records = collect(generate_permutations_for_type::<Foo>().expect("schema"));
    assert_eq!(records.len(), 45);
    assert_eq!(
        records.first(),
        Some(&Foo {
            a: 1,
            b: 1,
            c: 1,
            e: Letter::A
        })
    );
    assert_eq!(
        records.last(),
        Some(&Foo {
            a: 1,
            b: 3,
            c: 5,
            e: Letter::C
        })
    );

    let unique: HashSet<&Foo> = records.iter().collect();
    assert_eq!(unique.len(), records.len());
    for b in 1..=3 {
        for c in 1..=5 {
            for e in Letter::members() {
                assert!(unique.contains(&Foo { a: 1, b, c, e: *e }));
            }
        }
    }
}

#[test]
fn expected_count_matches_produced_records() {
    let schema = Arc::new(Foo::schema().expect("schema"));
    assert_eq!(schema.expected_count(), Some(45));

    let mut permutations = schema.permutations();
    let produced = permutations.by_ref().filter(|record| record.is_ok()).count();
    assert_eq!(produced, 45);
    assert_eq!(permutations.produced(), 45);
}

#[test]
fn no_ranged_fields_yields_single_default_record() {
    let records = collect(generate_permutations_for_type::<Plain>().expect("schema"));
    assert_eq!(records, vec![Plain::default()]);
}

#[test]
fn output_follows_odometer_order() {
    let schema = Arc::new(pair_schema(
        IntervalRange::new(1, 2),
        ValueList::new([10, 20, 30].map(FieldValue::Int)),
    ));
    let pairs: Vec<(i64, i64)> = collect(schema.permutations())
        .into_iter()
        .map(|pair| (pair.first, pair.second))
        .collect();
    assert_eq!(
        pairs,
        vec![(1, 10), (1, 20), (1, 30), (2, 10), (2, 20), (2, 30)]
    );
}

#[test]
fn unranged_fields_keep_default_value() {
    let schema = Arc::new(pair_schema(
        IntervalRange::new(0, 2),
        ValueList::new([FieldValue::Int(5)]),
    ));
    assert_eq!(schema.unranged_fields().to_vec(), vec!["note".to_string()]);
    for pair in collect(schema.permutations()) {
        assert!(pair.note.is_empty());
    }
}

#[test]
fn zero_count_interval_empties_the_product() {
    let schema = Arc::new(pair_schema(
        IntervalRange::new(1, 0),
        ValueList::new([1, 2, 3].map(FieldValue::Int)),
    ));
    assert_eq!(schema.expected_count(), Some(0));
    assert_eq!(schema.permutations().count(), 0);

    let schema = Arc::new(pair_schema(IntervalRange::new(1, 4), ValueList::new([])));
    assert_eq!(schema.permutations().count(), 0);
}

#[test]
fn negative_interval_count_behaves_as_empty() {
    let schema = Arc::new(pair_schema(
        IntervalRange::new(1, -5),
        ValueList::new([FieldValue::Int(1)]),
    ));
    assert_eq!(schema.expected_count(), Some(0));
    assert!(schema.permutations().next().is_none());
}

#[test]
fn expected_count_overflow_is_none() {
    let schema = pair_schema(
        IntervalRange::new(0, i64::MAX),
        ValueList::new([1, 2, 3].map(FieldValue::Int)),
    );
    assert_eq!(schema.expected_count(), None);
}

#[test]
fn traversals_are_independent_and_restartable() {
    let schema = Arc::new(Foo::schema().expect("schema"));
    let mut first = schema.permutations();
    let mut second = schema.permutations();

    let head = first.next().expect("first record").expect("valid record");
    let mut interleaved = vec![head];
    for _ in 0..4 {
        let _ = second.next();
        interleaved.push(first.next().expect("record").expect("valid record"));
    }

    let fresh: Vec<Foo> = collect(schema.permutations().take(5));
    assert_eq!(interleaved, fresh);
    assert_eq!(first.produced(), 5);
    assert_eq!(second.produced(), 4);
}

#[test]
fn consumer_can_stop_early() {
    let schema = Arc::new(pair_schema(
        IntervalRange::new(0, 1_000_000),
        ValueList::new((0..1_000).map(FieldValue::Int)),
    ));
    assert_eq!(schema.expected_count(), Some(1_000_000_000));

    let mut permutations = schema.permutations();
    let prefix: Vec<Pair> = collect(permutations.by_ref().take(3));
    assert_eq!(prefix.len(), 3);
    assert_eq!(prefix[2].second, 2);
    assert_eq!(permutations.produced(), 3);
}

#[test]
fn type_mismatch_surfaces_at_materialization_and_ends_traversal() {
    let schema = Arc::new(
        RecordSchema::<Pair>::builder("Pair")
            .field("first", IntervalRange::new(1, 2), |pair: &mut Pair, v| {
                pair.first = v
            })
            .field(
                "second",
                ValueList::new([FieldValue::Int(1), FieldValue::from("two"), FieldValue::Int(3)]),
                |pair: &mut Pair, v| pair.second = v,
            )
            .build()
            .expect("schema builds without checking value types"),
    );

    let mut permutations = schema.permutations();
    let first = permutations.next().expect("first item");
    assert_eq!(first.map(|pair| pair.second), Ok(1));

    let second = permutations.next().expect("second item");
    assert_eq!(
        second,
        Err(Error::TypeMismatch {
            field: "second".to_string(),
            expected: "i64".to_string(),
            found: "text".to_string(),
        })
    );
    assert!(permutations.next().is_none());
    assert!(permutations.next().is_none());
    assert_eq!(permutations.produced(), 1);
}

#[test]
fn constructor_failure_is_reported_to_consumer() {
    let schema = Arc::new(
        RecordSchemaBuilder::<Pair>::with_constructor("Broken", || {
            Err(Error::Construction("no default available".to_string()))
        })
        .field("first", IntervalRange::new(1, 3), |pair: &mut Pair, v| {
            pair.first = v
        })
        .build()
        .expect("schema"),
    );

    let items: Vec<Result<Pair>> = schema.permutations().collect();
    assert_eq!(
        items,
        vec![Err(Error::Construction("no default available".to_string()))]
    );
}

#[test]
fn constructor_failure_without_ranged_fields() {
    let schema = Arc::new(
        RecordSchemaBuilder::<Plain>::with_constructor("Broken", || {
            Err(Error::Construction("boom".to_string()))
        })
        .build()
        .expect("schema"),
    );

    let items: Vec<Result<Plain>> = schema.permutations().collect();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(Error::Construction(_))));
}

#[test]
fn field_registered_twice_is_rejected() {
    let result = RecordSchema::<Pair>::builder("Pair")
        .field("first", IntervalRange::new(1, 2), |pair: &mut Pair, v| {
            pair.first = v
        })
        .field("first", IntervalRange::new(5, 2), |pair: &mut Pair, v| {
            pair.first = v
        })
        .build();
    assert!(matches!(
        result,
        Err(Error::MultipleRanges { field }) if field == "first"
    ));

    let result = RecordSchema::<Pair>::builder("Pair")
        .field("first", IntervalRange::new(1, 2), |pair: &mut Pair, v| {
            pair.first = v
        })
        .unranged("first")
        .build();
    assert!(matches!(
        result,
        Err(Error::DuplicateField { field }) if field == "first"
    ));
}
