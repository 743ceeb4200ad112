/// Enumerations whose members can be enumerated as a field range.
///
/// Implementors list every member in declaration order; that order is the
/// order in which [`crate::EnumMembers`] yields them.
pub trait PermutationEnum: Copy + Send + Sync + 'static {
    /// Type name recorded on every [`crate::EnumValue`] of this enumeration.
    const NAME: &'static str;

    fn members() -> &'static [Self];

    fn label(self) -> &'static str;

    /// Position of `self` within [`PermutationEnum::members`].
    fn ordinal(self) -> Option<usize>
    where
        Self: PartialEq,
    {
        Self::members().iter().position(|member| *member == self)
    }
}
