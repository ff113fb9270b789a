use serde::Serialize;
use wbem_core::encode::IntrinsicCall;
use wbem_core::error::Result;
use wbem_core::model::{IParamValueData, IReturnValue, InstanceName, Value, ValueArray, ValueReference};

use super::{require, unexpected, WbemClient};

/// `<propertyValue>`: scalar, array, or reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PropertyValue {
    Value(Value),
    Array(ValueArray),
    Reference(ValueReference),
}

impl From<PropertyValue> for IParamValueData {
    fn from(v: PropertyValue) -> Self {
        match v {
            PropertyValue::Value(v) => IParamValueData::Value(v),
            PropertyValue::Array(v) => IParamValueData::Array(v),
            PropertyValue::Reference(v) => IParamValueData::Reference(v),
        }
    }
}

impl WbemClient {
    pub async fn get_property(
        &self,
        instance_name: &InstanceName,
        property_name: &str,
    ) -> Result<Option<PropertyValue>> {
        require(&instance_name.class_name, "InstanceName")?;
        require(property_name, "PropertyName")?;
        let call = IntrinsicCall::new("GetProperty", &self.namespace)
            .param("InstanceName", instance_name.clone())
            .param("PropertyName", property_name)
            .build();
        match self.intrinsic(call).await? {
            None | Some(IReturnValue::Empty) => Ok(None),
            Some(IReturnValue::Values(v)) => Ok(v.into_iter().next().map(PropertyValue::Value)),
            Some(IReturnValue::Array(a)) => Ok(Some(PropertyValue::Array(a))),
            Some(IReturnValue::Reference(r)) => Ok(Some(PropertyValue::Reference(r))),
            Some(other) => Err(unexpected("GetProperty", &other)),
        }
    }

    /// `SetProperty`. `None` leaves `NewValue` off, which servers treat as
    /// NULL.
    pub async fn set_property(
        &self,
        instance_name: &InstanceName,
        property_name: &str,
        new_value: Option<PropertyValue>,
    ) -> Result<()> {
        require(&instance_name.class_name, "InstanceName")?;
        require(property_name, "PropertyName")?;
        let call = IntrinsicCall::new("SetProperty", &self.namespace)
            .param("InstanceName", instance_name.clone())
            .param("PropertyName", property_name)
            .optional("NewValue", new_value)
            .build();
        self.intrinsic(call).await.map(|_| ())
    }
}
