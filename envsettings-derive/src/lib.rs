//! Derive macro implementation for envsettings

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Whether the type is spelled `Option<...>`
fn is_option(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(seg) = type_path.path.segments.last() {
            return seg.ident == "Option"
                && matches!(seg.arguments, syn::PathArguments::AngleBracketed(_));
        }
    }
    false
}

/// `Settings` derive macro
///
/// Generates a settings schema from the struct and loads it back into typed
/// fields after binding the environment.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[settings(prefix = "PREFIX_")]`: generate `ENV_PREFIX` and `from_env()`
///
/// **Field-level**:
/// - `#[settings(name = "setting_name")]`: Custom setting name (lowercase)
/// - `#[settings(default)]`: Start from `Default::default()`
/// - `#[settings(default = value)]`: Start from an explicit value
/// - `#[settings(no_environ)]`: Never bind from the environment
/// - `#[settings(coerce = "func")]`: Use a custom coercion function
///
/// `Option<T>` fields are optional and start out as `None`. Setting names,
/// given or taken from the field, must be lowercase since the binder
/// lower-cases environment variable suffixes.
///
/// # Example
///
/// See the `envsettings` crate documentation for usage examples.
#[proc_macro_derive(Settings, attributes(settings))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Settings only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Settings only supports structs",
            ));
        }
    };

    let mut declarations = Vec::with_capacity(fields.len());
    let mut extractions = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field)?;
        let optional = is_option(field_type);

        if optional && attrs.default.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "Option<T> fields cannot have default attribute (they default to None automatically)",
            ));
        }

        let setting_name = match attrs.name {
            Some(name) => name,
            None => {
                let name = field_name.unraw().to_string();
                attrs::check_setting_name(&name, field_name)?;
                name
            }
        };

        let coercion = match &attrs.coerce {
            Some(func) => quote! { #func },
            None => quote! { <#field_type as ::envsettings::SettingType>::coercion() },
        };

        let default_value = match attrs.default {
            Some(Some(expr)) => quote! {
                ::envsettings::de::default_value::<#field_type>(#expr)
            },
            Some(None) => quote! {
                ::envsettings::de::default_value::<#field_type>(::core::default::Default::default())
            },
            None => quote! { ::envsettings::Value::Null },
        };

        let mut declaration = quote! {
            let builder = builder.field(
                ::envsettings::FieldSpec::new(#setting_name)
                    .coercion(#coercion)
                    .default(#default_value)
            );
        };
        if optional {
            declaration.extend(quote! {
                let builder = builder.optional(#setting_name);
            });
        }
        if attrs.no_environ {
            declaration.extend(quote! {
                let builder = builder.no_environ(#setting_name);
            });
        }
        declarations.push(declaration);

        extractions.push(quote! {
            #field_name: ::envsettings::de::extract::<#field_type>(definition, #setting_name)?
        });
    }

    let from_env = struct_attrs.prefix.map(|prefix| {
        quote! {
            /// Environment variable prefix declared on the struct
            pub const ENV_PREFIX: &'static str = #prefix;

            /// Load settings from environment variables starting with [`Self::ENV_PREFIX`]
            ///
            /// # Errors
            ///
            /// See [`Self::load`].
            pub fn from_env() -> ::envsettings::anyhow::Result<Self> {
                Self::load(Self::ENV_PREFIX)
            }
        }
    });

    Ok(quote! {
        impl #struct_name {
            /// Settings schema with every field at its default value
            pub fn definition() -> ::envsettings::SettingsDefinition {
                let builder = ::envsettings::SettingsDefinition::builder();
                #(#declarations)*
                builder.build()
            }

            /// Read typed settings out of a bound definition
            ///
            /// # Errors
            ///
            /// - Required settings are still unset
            /// - A bound value does not fit its field type
            pub fn from_definition(
                definition: &::envsettings::SettingsDefinition,
            ) -> ::core::result::Result<Self, ::envsettings::SettingsError> {
                ::envsettings::ensure_ready(definition)?;
                ::core::result::Result::Ok(Self {
                    #(#extractions),*
                })
            }

            /// Bind environment variables starting with `prefix` and load settings
            ///
            /// # Errors
            ///
            /// - Required settings are not set by default or environment
            /// - Environment values cannot be converted into field types
            pub fn load(prefix: &str) -> ::envsettings::anyhow::Result<Self> {
                let mut definition = Self::definition();
                ::envsettings::bind_from_env(&mut definition, prefix);
                ::core::result::Result::Ok(Self::from_definition(&definition)?)
            }

            #from_env
        }
    })
}
