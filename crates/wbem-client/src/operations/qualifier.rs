use wbem_core::encode::IntrinsicCall;
use wbem_core::error::Result;
use wbem_core::model::{IReturnValue, QualifierDeclaration};

use super::{require, unexpected, WbemClient};

impl WbemClient {
    pub async fn get_qualifier(&self, qualifier_name: &str) -> Result<Option<QualifierDeclaration>> {
        require(qualifier_name, "QualifierName")?;
        let call = IntrinsicCall::new("GetQualifier", &self.namespace)
            .param("QualifierName", qualifier_name)
            .build();
        Ok(qualifier_declarations("GetQualifier", self.intrinsic(call).await?)?
            .into_iter()
            .next())
    }

    /// Creates the declaration, or overwrites it if it exists.
    pub async fn set_qualifier(&self, declaration: &QualifierDeclaration) -> Result<()> {
        require(&declaration.name, "QualifierDeclaration")?;
        let call = IntrinsicCall::new("SetQualifier", &self.namespace)
            .param("QualifierDeclaration", declaration.clone())
            .build();
        self.intrinsic(call).await.map(|_| ())
    }

    pub async fn delete_qualifier(&self, qualifier_name: &str) -> Result<()> {
        require(qualifier_name, "QualifierName")?;
        let call = IntrinsicCall::new("DeleteQualifier", &self.namespace)
            .param("QualifierName", qualifier_name)
            .build();
        self.intrinsic(call).await.map(|_| ())
    }

    pub async fn enumerate_qualifiers(&self) -> Result<Vec<QualifierDeclaration>> {
        let call = IntrinsicCall::new("EnumerateQualifiers", &self.namespace).build();
        qualifier_declarations("EnumerateQualifiers", self.intrinsic(call).await?)
    }
}

fn qualifier_declarations(
    method: &str,
    rv: Option<IReturnValue>,
) -> Result<Vec<QualifierDeclaration>> {
    match rv {
        None | Some(IReturnValue::Empty) => Ok(Vec::new()),
        Some(IReturnValue::QualifierDeclarations(v)) => Ok(v),
        Some(other) => Err(unexpected(method, &other)),
    }
}
