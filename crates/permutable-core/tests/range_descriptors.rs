use permutable_core::{
    BoolRange, EnumMembers, EnumValue, FieldValue, FromFieldValue, IntervalRange, LabelRange,
    PermutationEnum, RangeDescriptor, ValueList,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shade {
    Light,
    Medium,
    Dark,
}

impl PermutationEnum for Shade {
    const NAME: &'static str = "Shade";

    fn members() -> &'static [Self] {
        &[Shade::Light, Shade::Medium, Shade::Dark]
    }

    fn label(self) -> &'static str {
        match self {
            Shade::Light => "light",
            Shade::Medium => "medium",
            Shade::Dark => "dark",
        }
    }
}

fn ints(range: &dyn RangeDescriptor) -> Vec<i64> {
    range
        .get_range()
        .map(|value| value.as_i64().expect("integer value"))
        .collect()
}

#[test]
fn interval_yields_consecutive_integers() {
    let range = IntervalRange::new(-2, 4);
    assert_eq!(ints(&range), vec![-2, -1, 0, 1]);
    assert_eq!(range.len(), 4);
}

#[test]
fn interval_with_zero_or_negative_count_is_empty() {
    assert!(IntervalRange::new(10, 0).get_range().next().is_none());
    assert!(IntervalRange::new(10, -3).get_range().next().is_none());
    assert!(IntervalRange::new(10, -3).is_empty());
}

#[test]
fn interval_wraps_past_i64_max() {
    let range = IntervalRange::new(i64::MAX - 1, 3);
    assert_eq!(ints(&range), vec![i64::MAX - 1, i64::MAX, i64::MIN]);
}

#[test]
fn ranges_are_re_enumerable() {
    let range = IntervalRange::new(1, 3);
    assert_eq!(ints(&range), ints(&range));

    let labels = LabelRange::new("Size", ["s", "m"]);
    let first: Vec<FieldValue> = labels.get_range().collect();
    let second: Vec<FieldValue> = labels.get_range().collect();
    assert_eq!(first, second);
}

#[test]
fn enum_members_follow_declaration_order() {
    let range = EnumMembers::<Shade>::new();
    let labels: Vec<String> = range.get_range().map(|value| value.to_string()).collect();
    assert_eq!(labels, vec!["light", "medium", "dark"]);

    let members: Vec<Shade> = range
        .get_range()
        .map(|value| Shade::from_field_value(value).expect("shade member"))
        .collect();
    assert_eq!(members, Shade::members());
}

#[test]
fn enum_value_of_member_matches_range_output() {
    let first = EnumMembers::<Shade>::new()
        .get_range()
        .nth(1)
        .expect("second member");
    assert_eq!(Some(first), EnumValue::of(Shade::Medium).map(FieldValue::Enum));
}

#[test]
fn enum_conversion_rejects_other_enumerations() {
    let foreign = FieldValue::Enum(EnumValue::new("Other", "light", 0));
    assert_eq!(Shade::from_field_value(foreign), None);
}

#[test]
fn label_range_carries_type_name() {
    let range = LabelRange::new("Size", ["s", "m", "l"]);
    let values: Vec<FieldValue> = range.get_range().collect();
    assert_eq!(values.len(), 3);
    assert_eq!(
        values[2],
        FieldValue::Enum(EnumValue::new("Size", "l", 2))
    );
}

#[test]
fn value_list_and_bool_ranges() {
    let list = ValueList::new([FieldValue::from("x"), FieldValue::Null, FieldValue::Int(9)]);
    assert_eq!(
        list.get_range().collect::<Vec<_>>(),
        vec![FieldValue::from("x"), FieldValue::Null, FieldValue::Int(9)]
    );
    assert_eq!(
        BoolRange.get_range().collect::<Vec<_>>(),
        vec![FieldValue::Bool(false), FieldValue::Bool(true)]
    );
}
