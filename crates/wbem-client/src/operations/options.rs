//! Optional arguments per operation.
//!
//! `Default` carries each operation's documented defaults; flags equal to
//! the default are left off the wire.

use wbem_core::model::ClassName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetClassOptions {
    pub local_only: bool,
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
    pub property_list: Option<Vec<String>>,
}

impl Default for GetClassOptions {
    fn default() -> Self {
        Self {
            local_only: true,
            include_qualifiers: true,
            include_class_origin: false,
            property_list: None,
        }
    }
}

/// `LocalOnly` and `IncludeQualifiers` are deprecated by DSP0200 but still
/// honoured by most servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInstanceOptions {
    pub local_only: bool,
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
    pub property_list: Option<Vec<String>>,
}

impl Default for GetInstanceOptions {
    fn default() -> Self {
        Self {
            local_only: true,
            include_qualifiers: false,
            include_class_origin: false,
            property_list: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerateClassesOptions {
    pub deep_inheritance: bool,
    pub local_only: bool,
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
}

impl Default for EnumerateClassesOptions {
    fn default() -> Self {
        Self {
            deep_inheritance: false,
            local_only: true,
            include_qualifiers: true,
            include_class_origin: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerateInstancesOptions {
    pub deep_inheritance: bool,
    pub local_only: bool,
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
    pub property_list: Option<Vec<String>>,
}

impl Default for EnumerateInstancesOptions {
    fn default() -> Self {
        Self {
            deep_inheritance: true,
            local_only: true,
            include_qualifiers: false,
            include_class_origin: false,
            property_list: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociatorsOptions {
    pub assoc_class: Option<ClassName>,
    pub result_class: Option<ClassName>,
    pub role: Option<String>,
    pub result_role: Option<String>,
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
    pub property_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociatorNamesOptions {
    pub assoc_class: Option<ClassName>,
    pub result_class: Option<ClassName>,
    pub role: Option<String>,
    pub result_role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencesOptions {
    pub result_class: Option<ClassName>,
    pub role: Option<String>,
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
    pub property_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceNamesOptions {
    pub result_class: Option<ClassName>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyInstanceOptions {
    pub include_qualifiers: bool,
    pub property_list: Option<Vec<String>>,
}

impl Default for ModifyInstanceOptions {
    fn default() -> Self {
        Self {
            include_qualifiers: true,
            property_list: None,
        }
    }
}
