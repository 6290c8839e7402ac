//! Attribute parsing for `#[settings(...)]` annotations.
//!
//! This module extracts and validates settings attributes from the struct and
//! its fields during macro expansion.

use syn::{Attribute, Field, LitStr};

/// Parsed struct-level `#[settings(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Environment variable prefix used by the generated `from_env()`.
    pub prefix: Option<String>,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("settings") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // prefix = "APP_"
                if meta.path.is_ident("prefix") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new_spanned(lit, "prefix must not be empty"));
                    }
                    parsed.prefix = Some(lit.value());
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level settings attribute"))
            })?;
        }

        Ok(parsed)
    }
}

/// Parsed `#[settings(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Setting name override.
    ///
    /// If `None`, the field name is used as is.
    pub name: Option<String>,

    /// Default value strategy:
    /// - `None`: no default, the setting starts out null
    /// - `Some(None)`: use `Default::default()`
    /// - `Some(Some(tokens))`: use the explicit expression
    pub default: Option<Option<proc_macro2::TokenStream>>,

    /// Exclude the setting from environment binding.
    pub no_environ: bool,

    /// Custom coercion function path (e.g. `"my_crate::parse_duration"`).
    ///
    /// When specified, replaces the coercion picked from the field type.
    pub coerce: Option<syn::Path>,
}

impl FieldAttrs {
    /// Extract and parse `#[settings(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("settings") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    check_setting_name(&lit.value(), &lit)?;
                    attrs.name = Some(lit.value());
                    return Ok(());
                }

                // default or default = value
                if meta.path.is_ident("default") {
                    if meta.input.peek(syn::Token![=]) {
                        let value = meta.value()?;
                        let expr: syn::Expr = value.parse()?;
                        attrs.default = Some(Some(quote::quote!(#expr)));
                    } else {
                        attrs.default = Some(None);
                    }
                    return Ok(());
                }

                if meta.path.is_ident("no_environ") {
                    attrs.no_environ = true;
                    return Ok(());
                }

                // coerce = "function::path"
                if meta.path.is_ident("coerce") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.coerce = Some(lit.parse()?);
                    return Ok(());
                }

                Err(meta.error("unsupported settings attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Setting names must be reachable from the environment, where the binder
/// lower-cases everything after the prefix.
pub fn check_setting_name(name: &str, tokens: impl quote::ToTokens) -> syn::Result<()> {
    if name.is_empty() {
        return Err(syn::Error::new_spanned(tokens, "setting name must not be empty"));
    }
    if name != name.to_lowercase() {
        return Err(syn::Error::new_spanned(
            tokens,
            format!(
                "setting name `{name}` must be lowercase, use `{}`",
                name.to_lowercase()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_name_attribute() {
        let field: Field = parse_quote! {
            #[settings(name = "database_dsn")]
            pub dsn: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, Some("database_dsn".to_string()));
    }

    #[test]
    fn test_uppercase_name_is_an_error() {
        let field: Field = parse_quote! {
            #[settings(name = "DatabaseDsn")]
            pub dsn: String
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("`databasedsn`"));
    }

    #[test]
    fn test_empty_name_is_an_error() {
        let field: Field = parse_quote! {
            #[settings(name = "")]
            pub dsn: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_check_setting_name() {
        let ident: syn::Ident = parse_quote!(URL);
        assert!(check_setting_name("URL", &ident).is_err());
        assert!(check_setting_name("database_dsn", &ident).is_ok());
    }

    #[test]
    fn test_parse_default_number() {
        let field: Field = parse_quote! {
            #[settings(default = 42)]
            pub workers: i32
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(
            attrs.default.unwrap().map(|t| t.to_string()),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_parse_default_no_value() {
        let field: Field = parse_quote! {
            #[settings(default)]
            pub debug: bool
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(matches!(attrs.default, Some(None)));
    }

    #[test]
    fn test_parse_default_with_other_attributes() {
        let field: Field = parse_quote! {
            #[settings(default = vec![1, 2, 3], no_environ)]
            pub s5: Vec<i64>
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.default.is_some());
        assert!(attrs.no_environ);
    }

    #[test]
    fn test_parse_coerce() {
        let field: Field = parse_quote! {
            #[settings(coerce = "crate::coerce_duration")]
            pub timeout: u32
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        let path = attrs.coerce.unwrap();
        assert_eq!(quote::quote!(#path).to_string(), "crate :: coerce_duration");
    }

    #[test]
    fn test_unknown_attribute_is_an_error() {
        let field: Field = parse_quote! {
            #[settings(from_file)]
            pub secret: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_other_attributes_are_ignored() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            pub x: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.name.is_none());
        assert!(attrs.default.is_none());
    }

    #[test]
    fn test_parse_struct_prefix() {
        let input: syn::DeriveInput = parse_quote! {
            #[settings(prefix = "MYAPP_")]
            struct Settings {}
        };

        let attrs = StructAttrs::from_attrs(&input.attrs).unwrap();
        assert_eq!(attrs.prefix, Some("MYAPP_".to_string()));
    }

    #[test]
    fn test_empty_struct_prefix_is_an_error() {
        let input: syn::DeriveInput = parse_quote! {
            #[settings(prefix = "")]
            struct Settings {}
        };

        assert!(StructAttrs::from_attrs(&input.attrs).is_err());
    }
}
