use wbem_core::encode::ExtrinsicCall;
use wbem_core::error::{Result, WbemError};
use wbem_core::model::{ObjectName, ParamValue, ReturnData};

use super::{require, WbemClient};

impl WbemClient {
    /// Extrinsic method call on a class or instance. Yields the integer
    /// return code and the output parameters in document order.
    pub async fn invoke_method(
        &self,
        object_name: &ObjectName,
        method_name: &str,
        params: Vec<ParamValue>,
    ) -> Result<(i64, Vec<ParamValue>)> {
        require(object_name.class_name(), "ObjectName")?;
        require(method_name, "MethodName")?;
        let call = ExtrinsicCall::new(method_name, &self.namespace, object_name.clone())
            .params(params)
            .build();

        let (return_value, out_params) = self.extrinsic(call).await?;
        let return_value = return_value.ok_or_else(|| {
            WbemError::malformed(format!("{method_name}: response has no RETURNVALUE"))
        })?;
        let code = match &return_value.value {
            Some(ReturnData::Value(v)) => v.as_str().trim().parse::<i64>().map_err(|_| {
                WbemError::malformed(format!(
                    "{method_name}: non-integer return value {:?}",
                    v.as_str()
                ))
            })?,
            Some(ReturnData::Reference(_)) | None => {
                return Err(WbemError::malformed(format!(
                    "{method_name}: RETURNVALUE carries no scalar value"
                )))
            }
        };
        Ok((code, out_params))
    }
}
