use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Lit, LitStr, Type};

/// Derive `csv_schema()` for a CSV row struct.
///
/// Each named field becomes a `CsvField` entry:
/// - `name`: the field name, or the value of `#[serde(rename = "...")]`
/// - `required`: false for `Option<T>` fields and fields marked `#[serde(default)]`
/// - `description`: the field's doc comment, joined onto one line
///
/// `CsvField` must be in scope where the derive is used.
#[proc_macro_derive(CsvSchema, attributes(serde))]
pub fn derive_csv_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "CsvSchema requires named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "CsvSchema can only be derived for structs",
            ))
        }
    };

    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "unnamed field"))?;
        let serde = SerdeAttrs::parse(&field.attrs)?;
        let column = serde.rename.unwrap_or_else(|| ident.to_string());
        let required = !serde.default && !is_option(&field.ty);
        let description = doc_comment(&field.attrs);
        entries.push(quote! {
            CsvField {
                name: #column,
                required: #required,
                description: #description,
            }
        });
    }

    Ok(quote! {
        impl #name {
            pub fn csv_schema() -> &'static [CsvField] {
                static SCHEMA: &[CsvField] = &[#(#entries),*];
                SCHEMA
            }
        }
    })
}

#[derive(Default)]
struct SerdeAttrs {
    rename: Option<String>,
    default: bool,
}

impl SerdeAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = SerdeAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    parsed.rename = Some(value.value());
                } else if meta.path.is_ident("default") {
                    parsed.default = true;
                    // `default = "path"` form
                    if meta.input.peek(syn::Token![=]) {
                        let _: Expr = meta.value()?.parse()?;
                    }
                } else if meta.input.peek(syn::Token![=]) {
                    // other serde options are irrelevant to the schema
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

fn doc_comment(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
