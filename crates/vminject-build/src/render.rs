//! The single renderer: lowers a verified artifact to host source tokens.
//!
//! Nothing else in the pipeline produces text. Structural invariants are
//! checked by [`Artifact::verify`] before the first token is emitted.

use crate::artifact::{
    AnnotationSpec, Artifact, ArtifactError, CtorSpec, Expr, MethodSpec, ParamSpec, Stmt, TypeRef,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use vminject_schema::{types::TypePath, well_known};

/// Lower an artifact to a token stream, verifying it first.
pub fn render(artifact: &Artifact) -> Result<TokenStream, ArtifactError> {
    artifact.verify()?;
    Renderer { artifact }.render()
}

/// Lower an artifact to source text.
pub fn render_source(artifact: &Artifact) -> Result<String, ArtifactError> {
    render(artifact).map(|tokens| tokens.to_string())
}

struct Renderer<'a> {
    artifact: &'a Artifact,
}

impl Renderer<'_> {
    fn render(&self) -> Result<TokenStream, ArtifactError> {
        let ident = format_ident!("{}", self.artifact.simple_name());
        let doc = &self.artifact.doc;
        let annotations = self.annotations(&self.artifact.annotations)?;

        let body = if self.artifact.fields.is_empty() {
            quote!(;)
        } else {
            let fields = self
                .artifact
                .fields
                .iter()
                .map(|field| {
                    let name = format_ident!("{}", field.name);
                    let ty = self.type_ref(&field.ty)?;
                    Ok(quote!(#name: #ty))
                })
                .collect::<Result<Vec<_>, ArtifactError>>()?;
            quote!({ #(#fields),* })
        };

        let inherent = self.inherent_impl(&ident)?;
        let capability = self.capability_impl(&ident)?;

        Ok(quote! {
            #[doc = #doc]
            #(#annotations)*
            pub struct #ident #body

            #inherent
            #capability
        })
    }

    // Constructor plus, for artifacts without a capability trait, all
    // methods.
    fn inherent_impl(&self, ident: &proc_macro2::Ident) -> Result<TokenStream, ArtifactError> {
        let ctor = match &self.artifact.constructor {
            Some(ctor) => self.ctor(ctor)?,
            None => quote!(),
        };

        let methods = if self.artifact.implements.is_some() {
            vec![]
        } else {
            self.methods(true)?
        };

        if ctor.is_empty() && methods.is_empty() {
            return Ok(quote!());
        }

        let allow = self.lint_allowances(self.artifact.implements.is_none());

        Ok(quote! {
            #allow
            impl #ident {
                #ctor
                #(#methods)*
            }
        })
    }

    // Methods live on the capability trait when the artifact implements
    // one.
    fn capability_impl(&self, ident: &proc_macro2::Ident) -> Result<TokenStream, ArtifactError> {
        let Some(capability) = &self.artifact.implements else {
            return Ok(quote!());
        };

        let capability = self.abs_path(capability)?;
        let methods = self.methods(false)?;

        Ok(quote! {
            impl #capability for #ident {
                #(#methods)*
            }
        })
    }

    fn methods(&self, public: bool) -> Result<Vec<TokenStream>, ArtifactError> {
        self.artifact
            .methods
            .iter()
            .map(|method| self.method(method, public))
            .collect()
    }

    fn method(&self, method: &MethodSpec, public: bool) -> Result<TokenStream, ArtifactError> {
        let name = format_ident!("{}", method.name);
        let annotations = self.annotations(&method.annotations)?;
        let binding = match &method.binding_key {
            Some(key) => {
                let binding_path = self.bare_path(&well_known::path(well_known::BINDING_KEY))?;
                let key = self.bare_path(key)?;
                quote!(#[#binding_path(#key)])
            }
            None => quote!(),
        };
        let receiver = if method.takes_self {
            quote!(&self,)
        } else {
            quote!()
        };
        let params = self.params(&method.params)?;
        let ret = self.type_ref(&method.ret)?;
        let body = method
            .body
            .iter()
            .map(|stmt| self.stmt(stmt))
            .collect::<Result<Vec<_>, ArtifactError>>()?;
        let vis = if public { quote!(pub) } else { quote!() };

        Ok(quote! {
            #(#annotations)*
            #binding
            #vis fn #name(#receiver #(#params),*) -> #ret {
                #(#body)*
            }
        })
    }

    // The constructor stores each parameter into the same-named field;
    // verify() has already established the correspondence.
    fn ctor(&self, ctor: &CtorSpec) -> Result<TokenStream, ArtifactError> {
        let annotations = self.annotations(&ctor.annotations)?;
        let params = self.params(&ctor.params)?;
        let assigns = ctor
            .params
            .iter()
            .map(|param| format_ident!("{}", param.name));

        Ok(quote! {
            #(#annotations)*
            pub fn new(#(#params),*) -> Self {
                Self { #(#assigns),* }
            }
        })
    }

    fn params(&self, params: &[ParamSpec]) -> Result<Vec<TokenStream>, ArtifactError> {
        params
            .iter()
            .map(|param| {
                let name = format_ident!("{}", param.name);
                let ty = self.type_ref(&param.ty)?;
                Ok(quote!(#name: #ty))
            })
            .collect()
    }

    fn annotations(&self, annotations: &[AnnotationSpec]) -> Result<Vec<TokenStream>, ArtifactError> {
        annotations
            .iter()
            .map(|annotation| {
                let path = self.bare_path(&annotation.path)?;
                Ok(match &annotation.arg {
                    Some(arg) => {
                        let arg = self.bare_path(arg)?;
                        quote!(#[#path(#arg)])
                    }
                    None => quote!(#[#path]),
                })
            })
            .collect()
    }

    // Provider-function names keep the casing of the entity path; the
    // emitted impl block carries the lint allowance for it.
    fn lint_allowances(&self, holds_methods: bool) -> TokenStream {
        let mixed_case = holds_methods
            && self
                .artifact
                .methods
                .iter()
                .any(|method| method.name.chars().any(char::is_uppercase));

        if mixed_case {
            quote!(#[allow(non_snake_case)])
        } else {
            quote!()
        }
    }

    fn type_ref(&self, ty: &TypeRef) -> Result<TokenStream, ArtifactError> {
        Ok(match ty {
            TypeRef::Named(path) => self.abs_path(path)?,
            TypeRef::KeyOf(_) => self.abs_path(&well_known::path(well_known::TYPE_KEY))?,
            TypeRef::ProviderOf(_) => self.abs_path(&well_known::path(well_known::PROVIDER))?,
            TypeRef::MapOf(key, value) => {
                let key = self.type_ref(key)?;
                let value = self.type_ref(value)?;
                quote!(::std::collections::BTreeMap<#key, #value>)
            }
            TypeRef::BoxedDyn(path) => {
                let path = self.abs_path(path)?;
                quote!(::std::boxed::Box<dyn #path>)
            }
            TypeRef::Ref(inner) => {
                let inner = self.type_ref(inner)?;
                quote!(&#inner)
            }
            TypeRef::ResultOf(ok, err) => {
                let ok = self.type_ref(ok)?;
                let err = self.type_ref(err)?;
                quote!(::std::result::Result<#ok, #err>)
            }
        })
    }

    fn stmt(&self, stmt: &Stmt) -> Result<TokenStream, ArtifactError> {
        Ok(match stmt {
            Stmt::Let { name, expr } => {
                let name = format_ident!("{}", name);
                let expr = self.expr(expr)?;
                quote!(let #name = #expr;)
            }
            Stmt::LetElseFail { name, expr, error } => {
                let name = format_ident!("{}", name);
                let expr = self.expr(expr)?;
                let error = self.expr(error)?;
                quote! {
                    let ::std::option::Option::Some(#name) = #expr else {
                        return Err(#error);
                    };
                }
            }
            Stmt::FailIf { cond, error } => {
                let cond = self.expr(cond)?;
                let error = self.expr(error)?;
                quote! {
                    if #cond {
                        return Err(#error);
                    }
                }
            }
            Stmt::Return(expr) => self.expr(expr)?,
        })
    }

    fn expr(&self, expr: &Expr) -> Result<TokenStream, ArtifactError> {
        Ok(match expr {
            Expr::Var(name) => {
                let name = format_ident!("{}", name);
                quote!(#name)
            }
            Expr::SelfField(name) => {
                let name = format_ident!("{}", name);
                quote!(self.#name)
            }
            Expr::Call { recv, method, args } => {
                let recv = self.expr(recv)?;
                let method = format_ident!("{}", method);
                let args = self.exprs(args)?;
                quote!(#recv.#method(#(#args),*))
            }
            Expr::Construct { ty, args } => {
                let ty = self.abs_path(ty)?;
                let args = self.exprs(args)?;
                quote!(#ty::new(#(#args),*))
            }
            Expr::ErrorVariant { ty, variant } => {
                let ty = self.abs_path(ty)?;
                let variant = format_ident!("{}", variant);
                quote!(#ty::#variant)
            }
            Expr::Boxed(inner) => {
                let inner = self.expr(inner)?;
                quote!(::std::boxed::Box::new(#inner))
            }
            Expr::Ok(inner) => {
                let inner = self.expr(inner)?;
                quote!(Ok(#inner))
            }
            Expr::Not(inner) => {
                let inner = self.expr(inner)?;
                quote!(!#inner)
            }
        })
    }

    fn exprs(&self, exprs: &[Expr]) -> Result<Vec<TokenStream>, ArtifactError> {
        exprs.iter().map(|expr| self.expr(expr)).collect()
    }

    fn abs_path(&self, path: &TypePath) -> Result<TokenStream, ArtifactError> {
        let parsed = self.bare_path(path)?;
        Ok(quote!(::#parsed))
    }

    fn bare_path(&self, path: &TypePath) -> Result<syn::Path, ArtifactError> {
        syn::parse_str(&path.to_string()).map_err(|_| ArtifactError::InvalidPath {
            artifact: self.artifact.name.clone(),
            path: path.to_string(),
        })
    }
}
