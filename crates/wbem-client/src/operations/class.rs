use wbem_core::encode::IntrinsicCall;
use wbem_core::error::Result;
use wbem_core::model::{Class, ClassName, IReturnValue};

use super::options::{EnumerateClassesOptions, GetClassOptions};
use super::{require, unexpected, WbemClient};

impl WbemClient {
    /// `GetClass`. `None` when the server returned no class.
    pub async fn get_class(&self, class_name: &str, opts: GetClassOptions) -> Result<Option<Class>> {
        require(class_name, "ClassName")?;
        let d = GetClassOptions::default();
        let call = IntrinsicCall::new("GetClass", &self.namespace)
            .param("ClassName", ClassName::new(class_name))
            .flag("LocalOnly", opts.local_only, d.local_only)
            .flag("IncludeQualifiers", opts.include_qualifiers, d.include_qualifiers)
            .flag("IncludeClassOrigin", opts.include_class_origin, d.include_class_origin)
            .optional("PropertyList", opts.property_list)
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(None),
            Some(IReturnValue::Classes(v)) => Ok(v.into_iter().next()),
            Some(other) => Err(unexpected("GetClass", &other)),
        }
    }

    pub async fn delete_class(&self, class_name: &str) -> Result<()> {
        require(class_name, "ClassName")?;
        let call = IntrinsicCall::new("DeleteClass", &self.namespace)
            .param("ClassName", ClassName::new(class_name))
            .build();
        self.intrinsic(call).await.map(|_| ())
    }

    pub async fn create_class(&self, new_class: &Class) -> Result<()> {
        require(&new_class.name, "NewClass")?;
        let call = IntrinsicCall::new("CreateClass", &self.namespace)
            .param("NewClass", new_class.clone())
            .build();
        self.intrinsic(call).await.map(|_| ())
    }

    pub async fn modify_class(&self, modified_class: &Class) -> Result<()> {
        require(&modified_class.name, "ModifiedClass")?;
        let call = IntrinsicCall::new("ModifyClass", &self.namespace)
            .param("ModifiedClass", modified_class.clone())
            .build();
        self.intrinsic(call).await.map(|_| ())
    }

    /// `EnumerateClasses`. Without a class name the server starts at the
    /// namespace root.
    pub async fn enumerate_classes(
        &self,
        class_name: Option<&str>,
        opts: EnumerateClassesOptions,
    ) -> Result<Vec<Class>> {
        let d = EnumerateClassesOptions::default();
        let call = IntrinsicCall::new("EnumerateClasses", &self.namespace)
            .optional("ClassName", root_or(class_name))
            .flag("DeepInheritance", opts.deep_inheritance, d.deep_inheritance)
            .flag("LocalOnly", opts.local_only, d.local_only)
            .flag("IncludeQualifiers", opts.include_qualifiers, d.include_qualifiers)
            .flag("IncludeClassOrigin", opts.include_class_origin, d.include_class_origin)
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(Vec::new()),
            Some(IReturnValue::Classes(v)) => Ok(v),
            Some(other) => Err(unexpected("EnumerateClasses", &other)),
        }
    }

    pub async fn enumerate_class_names(
        &self,
        class_name: Option<&str>,
        deep_inheritance: bool,
    ) -> Result<Vec<ClassName>> {
        let call = IntrinsicCall::new("EnumerateClassNames", &self.namespace)
            .optional("ClassName", root_or(class_name))
            .flag("DeepInheritance", deep_inheritance, false)
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(Vec::new()),
            Some(IReturnValue::ClassNames(v)) => Ok(v),
            Some(other) => Err(unexpected("EnumerateClassNames", &other)),
        }
    }
}

fn root_or(class_name: Option<&str>) -> Option<ClassName> {
    class_name
        .filter(|c| !c.trim().is_empty())
        .map(ClassName::new)
}
