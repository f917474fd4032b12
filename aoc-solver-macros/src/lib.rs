//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use proc_macro2::{Literal, Span};
use quote::quote;
use syn::{parse_macro_input, Attribute, DeriveInput, LitInt, LitStr};

/// Generates `Solver` for a type that implements `PartSolver<1>` through `PartSolver<N>`.
///
/// # Attributes
///
/// - `max_parts`: Required. Number of parts, between 1 and 25.
///
/// # Example
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// struct Day10;
///
/// impl AocParser for Day10 { /* ... */ }
/// impl PartSolver<1> for Day10 { /* ... */ }
/// impl PartSolver<2> for Day10 { /* ... */ }
/// ```
///
/// A missing `PartSolver<K>` impl for some `K <= max_parts` is a compile error
/// pointing at the derive.
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let attr = find_attr(&input.attrs, "aoc_solver", name)?;

    let mut max_parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let lit: LitInt = meta.value()?.parse()?;
            max_parts = Some(lit.base10_parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported aoc_solver attribute, expected `max_parts`"))
        }
    })?;

    let max_parts = max_parts
        .ok_or_else(|| syn::Error::new_spanned(attr, "missing required `max_parts`"))?;
    if !(1..=25).contains(&max_parts) {
        return Err(syn::Error::new_spanned(attr, "`max_parts` must be between 1 and 25"));
    }

    let arms = (1..=max_parts).map(|part| {
        let part = Literal::u8_unsuffixed(part);
        quote! { #part => <Self as ::aoc_solver::PartSolver<#part>>::solve(shared), }
    });
    let max_parts_lit = Literal::u8_unsuffixed(max_parts);

    Ok(quote! {
        impl ::aoc_solver::Solver for #name {
            const PARTS: u8 = #max_parts_lit;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::aoc_solver::SolveError::PartNotImplemented(part)),
                }
            }
        }
    })
}

/// Submits a solver to the plugin inventory so `register_all_plugins` finds it.
///
/// # Attributes
///
/// - `year`: Required. The Advent of Code year (e.g., 2023)
/// - `day`: Required. The day number (1-25)
/// - `tags`: Optional. String literals used for filtering (e.g., `["grid", "bfs"]`)
///
/// The type must be a unit struct implementing `Solver`.
///
/// # Example
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2023, day = 21, tags = ["grid", "bfs"])]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let attr = find_attr(&input.attrs, "aoc", name)?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut tags: Vec<LitStr> = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let lit: LitInt = meta.value()?.parse()?;
            year = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("day") {
            let lit: LitInt = meta.value()?.parse()?;
            day = Some(lit.base10_parse()?);
        } else if meta.path.is_ident("tags") {
            let _ = meta.value()?;
            let content;
            syn::bracketed!(content in meta.input);
            let list = content.parse_terminated(|input| input.parse::<LitStr>(), syn::Token![,])?;
            tags.extend(list);
        } else {
            return Err(meta.error("unsupported aoc attribute, expected `year`, `day` or `tags`"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new_spanned(attr, "missing required `year`"))?;
    let day = day.ok_or_else(|| syn::Error::new_spanned(attr, "missing required `day`"))?;
    if !(1..=25).contains(&day) {
        return Err(syn::Error::new_spanned(attr, "`day` must be between 1 and 25"));
    }

    Ok(quote! {
        const _: () = {
            // Reports a missing `Solver` impl at the derive site.
            trait MustImplementSolver: ::aoc_solver::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}

fn find_attr<'a>(
    attrs: &'a [Attribute],
    ident: &str,
    name: &syn::Ident,
) -> syn::Result<&'a Attribute> {
    attrs.iter().find(|a| a.path().is_ident(ident)).ok_or_else(|| {
        syn::Error::new(
            Span::call_site(),
            format!("`{}` requires a #[{}(...)] attribute", name, ident),
        )
    })
}
