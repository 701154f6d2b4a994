//! Typed construction API for generated source units.
//!
//! Artifacts are data, never text: members, parameters, and statements are
//! built as values so structural invariants can be checked before a single
//! character is rendered.

use derive_more::Display;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;
use vminject_schema::types::TypePath;

///
/// ArtifactError
///
/// Structural violations detected by [`Artifact::verify`]; none of these
/// ever reach rendered text.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ArtifactError {
    #[error("artifact {artifact}: constructor parameter '{param}' does not match a field")]
    CtorParamMismatch { artifact: TypePath, param: String },

    #[error("artifact {artifact}: two provider functions bind the same key {key}")]
    DuplicateBindingKey { artifact: TypePath, key: TypePath },

    #[error("artifact {artifact}: duplicate field '{field}'")]
    DuplicateField { artifact: TypePath, field: String },

    #[error("artifact {artifact}: duplicate method '{method}'")]
    DuplicateMethod { artifact: TypePath, method: String },

    #[error("artifact {artifact}: method '{method}' declares parameter '{param}' twice")]
    DuplicateParam {
        artifact: TypePath,
        method: String,
        param: String,
    },

    #[error("artifact {artifact}: '{path}' is not a renderable path")]
    InvalidPath { artifact: TypePath, path: String },

    #[error("artifact {artifact}: field '{field}' is never initialized by the constructor")]
    UninitializedField { artifact: TypePath, field: String },
}

///
/// ArtifactKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum ArtifactKind {
    Factory,
    FactoryModule,
    Module,
}

///
/// TypeRef
///
/// Type position of a generated member.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TypeRef {
    /// A declared type by qualified path.
    Named(TypePath),
    /// Runtime key narrowed to subtypes of the given base.
    KeyOf(TypePath),
    /// Lazy provider yielding the given base.
    ProviderOf(TypePath),
    /// Map from key to value type.
    MapOf(Box<TypeRef>, Box<TypeRef>),
    /// Owned trait object of the given base.
    BoxedDyn(TypePath),
    /// Shared borrow.
    Ref(Box<TypeRef>),
    /// Fallible result.
    ResultOf(Box<TypeRef>, Box<TypeRef>),
}

impl TypeRef {
    #[must_use]
    pub fn map_of(key: Self, value: Self) -> Self {
        Self::MapOf(Box::new(key), Box::new(value))
    }

    #[must_use]
    pub fn reference(inner: Self) -> Self {
        Self::Ref(Box::new(inner))
    }

    #[must_use]
    pub fn result_of(ok: Self, err: Self) -> Self {
        Self::ResultOf(Box::new(ok), Box::new(err))
    }
}

///
/// AnnotationSpec
///
/// A host-container attribute attached to a generated item.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AnnotationSpec {
    pub path: TypePath,
    pub arg: Option<TypePath>,
}

impl AnnotationSpec {
    #[must_use]
    pub const fn marker(path: TypePath) -> Self {
        Self { path, arg: None }
    }

    #[must_use]
    pub const fn with_arg(path: TypePath, arg: TypePath) -> Self {
        Self {
            path,
            arg: Some(arg),
        }
    }
}

///
/// ParamSpec
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub ty: TypeRef,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

///
/// FieldSpec
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeRef,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

///
/// Expr
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Expr {
    /// A local or parameter by name.
    Var(String),
    /// A field of the receiver.
    SelfField(String),
    /// Method call on a receiver expression.
    Call {
        recv: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// Constructor invocation, arguments forwarded positionally.
    Construct { ty: TypePath, args: Vec<Expr> },
    /// A unit-like error variant.
    ErrorVariant { ty: TypePath, variant: String },
    /// Owned trait-object wrapping.
    Boxed(Box<Expr>),
    /// Success wrapping.
    Ok(Box<Expr>),
    /// Logical negation.
    Not(Box<Expr>),
}

impl Expr {
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    #[must_use]
    pub fn call(recv: Self, method: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call {
            recv: Box::new(recv),
            method: method.into(),
            args,
        }
    }

    #[must_use]
    pub fn error_variant(ty: TypePath, variant: impl Into<String>) -> Self {
        Self::ErrorVariant {
            ty,
            variant: variant.into(),
        }
    }
}

///
/// Stmt
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Stmt {
    /// `let <name> = <expr>;`
    Let { name: String, expr: Expr },
    /// `let Some(<name>) = <expr> else { return Err(<error>); };`
    LetElseFail {
        name: String,
        expr: Expr,
        error: Expr,
    },
    /// `if <cond> { return Err(<error>); }`
    FailIf { cond: Expr, error: Expr },
    /// Trailing expression of the body.
    Return(Expr),
}

///
/// CtorSpec
///
/// The artifact's sole constructor. Each parameter is stored into the
/// same-named field; [`Artifact::verify`] enforces the correspondence.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CtorSpec {
    pub annotations: Vec<AnnotationSpec>,
    pub params: Vec<ParamSpec>,
}

///
/// MethodSpec
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MethodSpec {
    pub name: String,
    pub annotations: Vec<AnnotationSpec>,
    pub params: Vec<ParamSpec>,
    pub ret: TypeRef,
    pub takes_self: bool,
    pub body: Vec<Stmt>,
    /// Key under which this provider is registered into the multi-binding
    /// collection, if any.
    pub binding_key: Option<TypePath>,
}

///
/// Artifact
///
/// One generated source unit, fully described. Rendering to text happens
/// at the sink boundary, after [`Artifact::verify`].
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Artifact {
    pub name: TypePath,
    pub kind: ArtifactKind,
    pub doc: String,
    pub annotations: Vec<AnnotationSpec>,
    /// Capability trait the generated type implements, if any.
    pub implements: Option<TypePath>,
    pub fields: Vec<FieldSpec>,
    pub constructor: Option<CtorSpec>,
    pub methods: Vec<MethodSpec>,
}

impl Artifact {
    /// Simple name of the generated type.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }

    /// Package the artifact is written into, if its name is qualified.
    #[must_use]
    pub fn package(&self) -> Option<TypePath> {
        self.name.qualifier()
    }

    /// Check structural invariants: member-name uniqueness, parameter-name
    /// uniqueness, constructor/field correspondence, binding-key
    /// uniqueness.
    pub fn verify(&self) -> Result<(), ArtifactError> {
        let mut fields = BTreeSet::new();
        for field in &self.fields {
            if !fields.insert(field.name.as_str()) {
                return Err(ArtifactError::DuplicateField {
                    artifact: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        if let Some(ctor) = &self.constructor {
            let mut seen = BTreeSet::new();
            for param in &ctor.params {
                if !seen.insert(param.name.as_str()) {
                    return Err(ArtifactError::DuplicateParam {
                        artifact: self.name.clone(),
                        method: "new".to_string(),
                        param: param.name.clone(),
                    });
                }
                if !fields.contains(param.name.as_str()) {
                    return Err(ArtifactError::CtorParamMismatch {
                        artifact: self.name.clone(),
                        param: param.name.clone(),
                    });
                }
            }
            for field in &fields {
                if !seen.contains(field) {
                    return Err(ArtifactError::UninitializedField {
                        artifact: self.name.clone(),
                        field: (*field).to_string(),
                    });
                }
            }
        } else if let Some(field) = self.fields.first() {
            return Err(ArtifactError::UninitializedField {
                artifact: self.name.clone(),
                field: field.name.clone(),
            });
        }

        let mut methods = BTreeSet::new();
        let mut keys = BTreeSet::new();
        for method in &self.methods {
            if !methods.insert(method.name.as_str()) {
                return Err(ArtifactError::DuplicateMethod {
                    artifact: self.name.clone(),
                    method: method.name.clone(),
                });
            }

            let mut params = BTreeSet::new();
            for param in &method.params {
                if !params.insert(param.name.as_str()) {
                    return Err(ArtifactError::DuplicateParam {
                        artifact: self.name.clone(),
                        method: method.name.clone(),
                        param: param.name.clone(),
                    });
                }
            }

            if let Some(key) = &method.binding_key {
                if !keys.insert(key.clone()) {
                    return Err(ArtifactError::DuplicateBindingKey {
                        artifact: self.name.clone(),
                        key: key.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
