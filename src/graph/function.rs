use serde::{Deserialize, Serialize};

use super::named_list::{Named, Rename};
use super::span::{Comment, Span};
use super::types::{TypeParam, TypeRef};

/// Function parameter or result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Empty for unnamed parameters/results
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Free function or method; `receiver` distinguishes the two
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// Base name of the receiver type; `None` for free functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    /// Interface/trait this method implements when declared in an
    /// implementation block for it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParam>,
    /// Body source; absent for interface elements and signatures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Span>,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    pub span: Span,
    pub exported: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "constructor")]
    pub is_constructor: bool,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            exported: name.chars().next().is_some_and(char::is_uppercase),
            name,
            ..Default::default()
        }
    }

    pub fn method(receiver: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            receiver: Some(receiver.into()),
            ..Function::new(name)
        }
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    /// Full captured source (signature and body) when parsed
    pub fn content(&self) -> Option<&str> {
        self.span.text()
    }

    pub fn body_text(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.text())
    }

    /// Identity key used by documents: the signature when known
    pub fn key(&self) -> &str {
        if self.signature.is_empty() {
            &self.name
        } else {
            &self.signature
        }
    }
}

impl Named for Function {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Rename for Function {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
