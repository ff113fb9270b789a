use serde::Serialize;
use wbem_core::encode::IntrinsicCall;
use wbem_core::error::Result;
use wbem_core::model::{
    ClassName, IReturnValue, Instance, InstanceName, ValueNamedInstance, ValueObject,
    ValueObjectWithLocalPath, ValueObjectWithPath,
};

use super::options::{EnumerateInstancesOptions, GetInstanceOptions, ModifyInstanceOptions};
use super::{require, unexpected, WbemClient};

/// One `ExecQuery` result. Servers pick the shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryObject {
    Object(ValueObject),
    WithLocalPath(ValueObjectWithLocalPath),
    WithPath(ValueObjectWithPath),
}

impl WbemClient {
    pub async fn get_instance(
        &self,
        instance_name: &InstanceName,
        opts: GetInstanceOptions,
    ) -> Result<Option<Instance>> {
        require(&instance_name.class_name, "InstanceName")?;
        let d = GetInstanceOptions::default();
        let call = IntrinsicCall::new("GetInstance", &self.namespace)
            .param("InstanceName", instance_name.clone())
            .flag("LocalOnly", opts.local_only, d.local_only)
            .flag("IncludeQualifiers", opts.include_qualifiers, d.include_qualifiers)
            .flag("IncludeClassOrigin", opts.include_class_origin, d.include_class_origin)
            .optional("PropertyList", opts.property_list)
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(None),
            Some(IReturnValue::Instances(v)) => Ok(v.into_iter().next()),
            Some(other) => Err(unexpected("GetInstance", &other)),
        }
    }

    pub async fn delete_instance(&self, instance_name: &InstanceName) -> Result<()> {
        require(&instance_name.class_name, "InstanceName")?;
        let call = IntrinsicCall::new("DeleteInstance", &self.namespace)
            .param("InstanceName", instance_name.clone())
            .build();
        self.intrinsic(call).await.map(|_| ())
    }

    /// `CreateInstance`. Yields the name the server assigned, if it sent one.
    pub async fn create_instance(&self, new_instance: &Instance) -> Result<Option<InstanceName>> {
        require(&new_instance.class_name, "NewInstance")?;
        let call = IntrinsicCall::new("CreateInstance", &self.namespace)
            .param("NewInstance", new_instance.clone())
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(None),
            Some(IReturnValue::InstanceNames(v)) => Ok(v.into_iter().next()),
            Some(other) => Err(unexpected("CreateInstance", &other)),
        }
    }

    pub async fn modify_instance(
        &self,
        modified_instance: &ValueNamedInstance,
        opts: ModifyInstanceOptions,
    ) -> Result<()> {
        require(
            &modified_instance.instance_name.class_name,
            "ModifiedInstance",
        )?;
        let d = ModifyInstanceOptions::default();
        let call = IntrinsicCall::new("ModifyInstance", &self.namespace)
            .param("ModifiedInstance", modified_instance.clone())
            .flag("IncludeQualifiers", opts.include_qualifiers, d.include_qualifiers)
            .optional("PropertyList", opts.property_list)
            .build();
        self.intrinsic(call).await.map(|_| ())
    }

    pub async fn enumerate_instances(
        &self,
        class_name: &str,
        opts: EnumerateInstancesOptions,
    ) -> Result<Vec<ValueNamedInstance>> {
        require(class_name, "ClassName")?;
        let d = EnumerateInstancesOptions::default();
        let call = IntrinsicCall::new("EnumerateInstances", &self.namespace)
            .param("ClassName", ClassName::new(class_name))
            .flag("DeepInheritance", opts.deep_inheritance, d.deep_inheritance)
            .flag("LocalOnly", opts.local_only, d.local_only)
            .flag("IncludeQualifiers", opts.include_qualifiers, d.include_qualifiers)
            .flag("IncludeClassOrigin", opts.include_class_origin, d.include_class_origin)
            .optional("PropertyList", opts.property_list)
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(Vec::new()),
            Some(IReturnValue::NamedInstances(v)) => Ok(v),
            Some(other) => Err(unexpected("EnumerateInstances", &other)),
        }
    }

    pub async fn enumerate_instance_names(&self, class_name: &str) -> Result<Vec<InstanceName>> {
        require(class_name, "ClassName")?;
        let call = IntrinsicCall::new("EnumerateInstanceNames", &self.namespace)
            .param("ClassName", ClassName::new(class_name))
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(Vec::new()),
            Some(IReturnValue::InstanceNames(v)) => Ok(v),
            Some(other) => Err(unexpected("EnumerateInstanceNames", &other)),
        }
    }

    /// `ExecQuery`. The query is passed through untouched.
    pub async fn exec_query(&self, query_language: &str, query: &str) -> Result<Vec<QueryObject>> {
        require(query_language, "QueryLanguage")?;
        require(query, "Query")?;
        let call = IntrinsicCall::new("ExecQuery", &self.namespace)
            .param("QueryLanguage", query_language)
            .param("Query", query)
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(Vec::new()),
            Some(IReturnValue::Objects(v)) => Ok(v.into_iter().map(QueryObject::Object).collect()),
            Some(IReturnValue::ObjectsWithLocalPath(v)) => {
                Ok(v.into_iter().map(QueryObject::WithLocalPath).collect())
            }
            Some(IReturnValue::ObjectsWithPath(v)) => {
                Ok(v.into_iter().map(QueryObject::WithPath).collect())
            }
            Some(other) => Err(unexpected("ExecQuery", &other)),
        }
    }
}
