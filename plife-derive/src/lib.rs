//! Derive macros for the plife particle simulation engine.
//!
//! This crate provides one derive macro:
//!
//! - [`Species`] - Turns a unit enum into a named, colored set of particle groups
//!
//! # Usage
//!
//! The macro is re-exported from the main `plife` crate. You don't need
//! to add this crate directly:
//!
//! ```ignore
//! use plife::prelude::*;
//!
//! #[derive(Species, Clone, Copy, PartialEq, Debug)]
//! enum Swarm {
//!     #[species(name = "Magenta", color = "#FF18C8")]
//!     Magenta,
//!     Cyan,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive macro for particle group enums.
///
/// Variants are assigned sequential species indices starting from 0, the
/// same indices used by `plife::Group::Species`.
///
/// # Generated Items
///
/// For an enum `Swarm`:
///
/// - `impl plife::Species for Swarm` - names, colors and index conversions
/// - `impl From<Swarm> for u32` - Convert variant to its species index
/// - `impl From<u32> for Swarm` - Convert back (invalid values default to first variant)
/// - `impl From<Swarm> for plife::Group` - Use a variant wherever a group is expected
///
/// # Variant Attributes
///
/// `#[species(name = "...", color = "#RRGGBB")]` overrides the display name
/// (defaults to the variant identifier) and the color (defaults to the
/// built-in palette).
///
/// # Panics
///
/// The macro panics at compile time if:
/// - Applied to a struct instead of an enum
/// - Any variant has fields (tuple or struct variants)
/// - Enum has zero variants
/// - A `#[species(...)]` attribute contains an unknown key
#[proc_macro_derive(Species, attributes(species))]
pub fn derive_species(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => panic!("Species derive only supports enums"),
    };

    for variant in variants.iter() {
        if !matches!(variant.fields, Fields::Unit) {
            panic!(
                "Species enum variants must be unit variants (no fields). \
                 Found fields on variant '{}'",
                variant.ident
            );
        }
    }

    let first_variant = &variants
        .first()
        .expect("Enum must have at least one variant")
        .ident;

    let mut names = Vec::new();
    let mut colors = Vec::new();
    for variant in variants.iter() {
        let (display, color) = species_attributes(&variant.attrs);
        names.push(display.unwrap_or_else(|| variant.ident.to_string()));
        colors.push(generate_color(color.as_deref()));
    }

    let into_arms: Vec<proc_macro2::TokenStream> = variants
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let variant_name = &variant.ident;
            let idx = i as u32;
            quote! { #name::#variant_name => #idx }
        })
        .collect();

    let from_arms: Vec<proc_macro2::TokenStream> = variants
        .iter()
        .enumerate()
        .map(|(i, variant)| {
            let variant_name = &variant.ident;
            let idx = i as u32;
            quote! { #idx => Some(#name::#variant_name) }
        })
        .collect();

    let expanded = quote! {
        impl plife::Species for #name {
            const NAMES: &'static [&'static str] = &[#(#names),*];
            const COLORS: &'static [Option<&'static str>] = &[#(#colors),*];

            fn index(self) -> u32 {
                match self {
                    #(#into_arms),*
                }
            }

            fn from_index(index: u32) -> Option<Self> {
                match index {
                    #(#from_arms,)*
                    _ => None,
                }
            }
        }

        impl From<#name> for u32 {
            fn from(value: #name) -> u32 {
                <#name as plife::Species>::index(value)
            }
        }

        impl From<u32> for #name {
            fn from(value: u32) -> #name {
                <#name as plife::Species>::from_index(value).unwrap_or(#name::#first_variant)
            }
        }

        impl From<#name> for plife::Group {
            fn from(value: #name) -> plife::Group {
                plife::Group::Species(<#name as plife::Species>::index(value))
            }
        }
    };

    TokenStream::from(expanded)
}

/// `Some("#RRGGBB")` or `None` as an `Option<&'static str>` expression.
fn generate_color(color: Option<&str>) -> proc_macro2::TokenStream {
    match color {
        Some(hex) => quote! { Some(#hex) },
        None => quote! { None },
    }
}

/// Reads `name` and `color` out of `#[species(...)]` attributes.
fn species_attributes(attrs: &[Attribute]) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut color = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("species")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("color") {
                let value: LitStr = meta.value()?.parse()?;
                color = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `name` or `color`"))
            }
        })
        .unwrap_or_else(|e| panic!("Invalid #[species] attribute: {}", e));
    }

    (name, color)
}
