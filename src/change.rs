use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Breaking,
    Dangerous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    TypeRemoved,
    TypeChangedKind,
    TypeRemovedFromUnion,
    ValueRemovedFromEnum,
    RequiredInputFieldAdded,
    ImplementedInterfaceRemoved,
    FieldRemoved,
    FieldChangedKind,
    RequiredArgAdded,
    ArgRemoved,
    ArgChangedKind,
    DirectiveRemoved,
    DirectiveArgRemoved,
    RequiredDirectiveArgAdded,
    DirectiveRepeatableRemoved,
    DirectiveLocationRemoved,
    ValueAddedToEnum,
    ImplementedInterfaceAdded,
    TypeAddedToUnion,
    OptionalInputFieldAdded,
    OptionalArgAdded,
    ArgDefaultValueChange,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::TypeRemoved => "TYPE_REMOVED",
            ChangeKind::TypeChangedKind => "TYPE_CHANGED_KIND",
            ChangeKind::TypeRemovedFromUnion => "TYPE_REMOVED_FROM_UNION",
            ChangeKind::ValueRemovedFromEnum => "VALUE_REMOVED_FROM_ENUM",
            ChangeKind::RequiredInputFieldAdded => "REQUIRED_INPUT_FIELD_ADDED",
            ChangeKind::ImplementedInterfaceRemoved => "IMPLEMENTED_INTERFACE_REMOVED",
            ChangeKind::FieldRemoved => "FIELD_REMOVED",
            ChangeKind::FieldChangedKind => "FIELD_CHANGED_KIND",
            ChangeKind::RequiredArgAdded => "REQUIRED_ARG_ADDED",
            ChangeKind::ArgRemoved => "ARG_REMOVED",
            ChangeKind::ArgChangedKind => "ARG_CHANGED_KIND",
            ChangeKind::DirectiveRemoved => "DIRECTIVE_REMOVED",
            ChangeKind::DirectiveArgRemoved => "DIRECTIVE_ARG_REMOVED",
            ChangeKind::RequiredDirectiveArgAdded => "REQUIRED_DIRECTIVE_ARG_ADDED",
            ChangeKind::DirectiveRepeatableRemoved => "DIRECTIVE_REPEATABLE_REMOVED",
            ChangeKind::DirectiveLocationRemoved => "DIRECTIVE_LOCATION_REMOVED",
            ChangeKind::ValueAddedToEnum => "VALUE_ADDED_TO_ENUM",
            ChangeKind::ImplementedInterfaceAdded => "IMPLEMENTED_INTERFACE_ADDED",
            ChangeKind::TypeAddedToUnion => "TYPE_ADDED_TO_UNION",
            ChangeKind::OptionalInputFieldAdded => "OPTIONAL_INPUT_FIELD_ADDED",
            ChangeKind::OptionalArgAdded => "OPTIONAL_ARG_ADDED",
            ChangeKind::ArgDefaultValueChange => "ARG_DEFAULT_VALUE_CHANGE",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ChangeKind::ValueAddedToEnum
            | ChangeKind::ImplementedInterfaceAdded
            | ChangeKind::TypeAddedToUnion
            | ChangeKind::OptionalInputFieldAdded
            | ChangeKind::OptionalArgAdded
            | ChangeKind::ArgDefaultValueChange => Severity::Dangerous,
            _ => Severity::Breaking,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub description: String,
}

impl Change {
    pub fn new(kind: ChangeKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.kind, self.description)
    }
}
