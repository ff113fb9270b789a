use wbem_core::encode::IntrinsicCall;
use wbem_core::error::Result;
use wbem_core::model::{IReturnValue, ObjectName, ObjectPath, ValueObjectWithPath};

use super::options::{
    AssociatorNamesOptions, AssociatorsOptions, ReferenceNamesOptions, ReferencesOptions,
};
use super::{require, unexpected, WbemClient};

impl WbemClient {
    pub async fn associators(
        &self,
        object_name: &ObjectName,
        opts: AssociatorsOptions,
    ) -> Result<Vec<ValueObjectWithPath>> {
        require(object_name.class_name(), "ObjectName")?;
        let call = IntrinsicCall::new("Associators", &self.namespace)
            .param("ObjectName", object_name.clone())
            .optional("AssocClass", opts.assoc_class)
            .optional("ResultClass", opts.result_class)
            .optional("Role", opts.role)
            .optional("ResultRole", opts.result_role)
            .flag("IncludeQualifiers", opts.include_qualifiers, false)
            .flag("IncludeClassOrigin", opts.include_class_origin, false)
            .optional("PropertyList", opts.property_list)
            .build();
        objects_with_path("Associators", self.intrinsic(call).await?)
    }

    pub async fn associator_names(
        &self,
        object_name: &ObjectName,
        opts: AssociatorNamesOptions,
    ) -> Result<Vec<ObjectPath>> {
        require(object_name.class_name(), "ObjectName")?;
        let call = IntrinsicCall::new("AssociatorNames", &self.namespace)
            .param("ObjectName", object_name.clone())
            .optional("AssocClass", opts.assoc_class)
            .optional("ResultClass", opts.result_class)
            .optional("Role", opts.role)
            .optional("ResultRole", opts.result_role)
            .build();
        object_paths("AssociatorNames", self.intrinsic(call).await?)
    }

    pub async fn references(
        &self,
        object_name: &ObjectName,
        opts: ReferencesOptions,
    ) -> Result<Vec<ValueObjectWithPath>> {
        require(object_name.class_name(), "ObjectName")?;
        let call = IntrinsicCall::new("References", &self.namespace)
            .param("ObjectName", object_name.clone())
            .optional("ResultClass", opts.result_class)
            .optional("Role", opts.role)
            .flag("IncludeQualifiers", opts.include_qualifiers, false)
            .flag("IncludeClassOrigin", opts.include_class_origin, false)
            .optional("PropertyList", opts.property_list)
            .build();
        objects_with_path("References", self.intrinsic(call).await?)
    }

    pub async fn reference_names(
        &self,
        object_name: &ObjectName,
        opts: ReferenceNamesOptions,
    ) -> Result<Vec<ObjectPath>> {
        require(object_name.class_name(), "ObjectName")?;
        let call = IntrinsicCall::new("ReferenceNames", &self.namespace)
            .param("ObjectName", object_name.clone())
            .optional("ResultClass", opts.result_class)
            .optional("Role", opts.role)
            .build();
        object_paths("ReferenceNames", self.intrinsic(call).await?)
    }
}

fn objects_with_path(method: &str, rv: Option<IReturnValue>) -> Result<Vec<ValueObjectWithPath>> {
    match rv {
        None | Some(IReturnValue::Empty) => Ok(Vec::new()),
        Some(IReturnValue::ObjectsWithPath(v)) => Ok(v),
        Some(other) => Err(unexpected(method, &other)),
    }
}

fn object_paths(method: &str, rv: Option<IReturnValue>) -> Result<Vec<ObjectPath>> {
    match rv {
        None | Some(IReturnValue::Empty) => Ok(Vec::new()),
        Some(IReturnValue::ObjectPaths(v)) => Ok(v),
        Some(other) => Err(unexpected(method, &other)),
    }
}
