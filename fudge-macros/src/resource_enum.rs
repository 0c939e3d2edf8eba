use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Expr, ExprLit, ExprUnary, Fields, Lit, Result, UnOp};

fn literal_discriminant(expr: &Expr) -> Result<i64> {
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Int(int), .. }) => int.base10_parse::<i64>(),
        Expr::Unary(ExprUnary { op: UnOp::Neg(_), expr, .. }) => Ok(-literal_discriminant(expr)?),
        Expr::Group(group) => literal_discriminant(&group.expr),
        Expr::Paren(paren) => literal_discriminant(&paren.expr),
        other => Err(Error::new(
            other.span(),
            "ResourceEnum discriminants must be integer literals",
        )),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let data = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(Error::new(
                input.span(),
                "ResourceEnum can only be derived for enums",
            ))
        },
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "ResourceEnum cannot be derived for generic enums",
        ));
    }

    let mut next = 0i64;
    let mut to_raw = Vec::with_capacity(data.variants.len());
    let mut from_raw = Vec::with_capacity(data.variants.len());

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.span(),
                "ResourceEnum variants cannot carry fields",
            ));
        }

        let value = match &variant.discriminant {
            Some((_, expr)) => literal_discriminant(expr)?,
            None => next,
        };
        next = value.wrapping_add(1);

        let ident = &variant.ident;
        to_raw.push(quote! { #name::#ident => #value });
        from_raw.push(quote! { #value => ::core::option::Option::Some(#name::#ident) });
    }

    Ok(quote! {
        impl ::fudge_theme::value::ResourceEnum for #name {
            const TYPE_NAME: &'static str = ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#name));

            fn to_raw(self) -> i64 {
                match self {
                    #(#to_raw,)*
                }
            }

            fn from_raw(raw: i64) -> ::core::option::Option<Self> {
                match raw {
                    #(#from_raw,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

pub fn derive(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    expand(input).unwrap_or_else(|err| err.to_compile_error())
}
