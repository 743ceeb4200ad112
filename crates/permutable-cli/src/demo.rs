use std::fmt;
use std::io::Write;

use permutable_core::{EnumMembers, IntervalRange, PermutationEnum, Result};
use permutable_generate::{Permutable, RecordSchema, generate_permutations_for_type};

use crate::CliError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Letter {
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

/// Demonstration record: three integer intervals and one enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Foo {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub e: Letter,
}

impl Permutable for Foo {
    fn schema() -> Result<RecordSchema<Self>> {
        RecordSchema::builder("Foo")
            .field("a", IntervalRange::new(1, 1), |foo: &mut Foo, value| foo.a = value)
            .field("b", IntervalRange::new(1, 3), |foo: &mut Foo, value| foo.b = value)
            .field("c", IntervalRange::new(1, 5), |foo: &mut Foo, value| foo.c = value)
            .field("e", EnumMembers::<Letter>::new(), |foo: &mut Foo, value| {
                foo.e = value
            })
            .build()
    }
}

impl fmt::Display for Foo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Foo [a={}; b={}; c={}; e={}]",
            self.a,
            self.b,
            self.c,
            self.e.label()
        )
    }
}

/// Write one line per Foo permutation, returning the number written.
pub fn write_demo(out: &mut impl Write) -> std::result::Result<u64, CliError> {
    let mut written = 0_u64;
    for foo in generate_permutations_for_type::<Foo>()? {
        writeln!(out, "{}", foo?)?;
        written += 1;
    }
    Ok(written)
}
