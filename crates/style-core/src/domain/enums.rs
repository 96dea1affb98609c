//! Enum type identity.
//!
//! Every enum-shaped node carries a reference to a static [`EnumType`] table:
//! the type's name plus its ordered member names.  Two enum values are of the
//! same type exactly when they point at tables with the same name, so renaming
//! a value can never silently move it to a different enum type.

use std::fmt;

/// A named, closed set of enum members.
///
/// Tables are declared as `static` items next to the schema that uses them
/// (see `style::schema`).  Member order is the order a UI should list them in.
#[derive(Debug)]
pub struct EnumType {
    /// Type name, e.g. `"PointerAlignmentStyle"`.
    pub name: &'static str,
    /// Legal member names, e.g. `["Left", "Right", "Middle"]`.  Never empty.
    pub members: &'static [&'static str],
}

impl EnumType {
    /// Creates a new enum type table.
    pub const fn new(name: &'static str, members: &'static [&'static str]) -> Self {
        Self { name, members }
    }

    /// Returns the position of `member` in this type, if it is a legal member.
    pub fn position(&self, member: &str) -> Option<usize> {
        self.members.iter().position(|m| *m == member)
    }

    /// Returns `true` if `member` is a legal member of this type.
    pub fn contains(&self, member: &str) -> bool {
        self.position(member).is_some()
    }

    /// Builds the value of this type named `member`.
    ///
    /// Returns `None` when `member` is not one of this type's members.
    pub fn value(&'static self, member: &str) -> Option<EnumValue> {
        self.position(member).map(|index| EnumValue { ty: self, index })
    }

    /// Returns the first declared member of this type.
    pub fn first(&'static self) -> EnumValue {
        EnumValue { ty: self, index: 0 }
    }
}

/// One member of one enum type.
///
/// The `index` is only ever produced by [`EnumType::value`] or
/// [`EnumType::first`], so it is always in bounds for `ty.members`.
#[derive(Debug, Clone, Copy)]
pub struct EnumValue {
    ty: &'static EnumType,
    index: usize,
}

impl EnumValue {
    /// Returns the enum type this value belongs to.
    pub fn enum_type(&self) -> &'static EnumType {
        self.ty
    }

    /// Returns the member name of this value.
    pub fn name(&self) -> &'static str {
        self.ty.members[self.index]
    }

    /// Returns `true` if `other` belongs to the same enum type.
    pub fn same_type(&self, other: &EnumValue) -> bool {
        self.ty.name == other.ty.name
    }

    /// Builds the value of the *same* enum type named `member`.
    ///
    /// Returns `None` when `member` is not legal for this value's type.
    pub fn with_member(&self, member: &str) -> Option<EnumValue> {
        self.ty.value(member)
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_type(other) && self.index == other.index
    }
}

impl Eq for EnumValue {}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
