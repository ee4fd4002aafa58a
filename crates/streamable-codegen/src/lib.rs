// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DataEnum, DataStruct, DeriveInput, Fields,
    Generics, Ident, Member, Type,
};

/// Role of a struct field in a `Streamable` level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldRole {
    /// Written and read by this level, in declaration order.
    Own,
    /// Holds the level this one extends.
    Base,
    /// Not streamed; restored with `Default`.
    Skip,
}

struct FieldInfo {
    member: Member,
    ty: Type,
    role: FieldRole,
}

/// `#[derive(Streamable)]`: one hierarchy level from a struct's fields.
///
/// Every field is streamed in declaration order unless marked:
/// - `#[streamable(base)]` - the field holding the level below (at most one;
///   without it the level is a root),
/// - `#[streamable(skip)]` - not streamed, rebuilt with `Default::default()`.
///
/// Example:
/// ```ignore
/// use streamable::Streamable;
///
/// #[derive(Streamable)]
/// struct Shape {
///     kind: ShapeKind,
/// }
///
/// #[derive(Streamable)]
/// struct Rectangle {
///     #[streamable(base)]
///     shape: Shape,
///     width: f64,
///     height: f64,
/// }
/// ```
#[proc_macro_derive(Streamable, attributes(streamable))]
pub fn derive_streamable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_streamable(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// `#[derive(FixedLayout)]`: a known-size type streamed with no prefix.
///
/// - structs: fields packed back to back in declaration order, every field
///   itself `FixedLayout`; width is the sum of the field widths,
/// - fieldless enums with an integer `#[repr]`: streamed as that integer.
///
/// Also implements `Field` for the type.
#[proc_macro_derive(FixedLayout)]
pub fn derive_fixed_layout(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = match &input.data {
        Data::Struct(data) => expand_fixed_struct(&input, data),
        Data::Enum(data) => expand_fixed_enum(&input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input,
            "FixedLayout cannot be derived for unions; use pod_layout! instead",
        )),
    };
    match expanded {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

// ============================================================================
// Streamable
// ============================================================================

fn expand_streamable(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Streamable can only be derived for structs",
        ));
    };
    if !matches!(data.fields, Fields::Named(_)) {
        return Err(syn::Error::new_spanned(
            input,
            "Streamable requires named fields",
        ));
    }

    let fields = collect_fields(&data.fields)?;
    let base = fields.iter().find(|f| f.role == FieldRole::Base);
    let own: Vec<&FieldInfo> = fields.iter().filter(|f| f.role == FieldRole::Own).collect();

    let mut generics = input.generics.clone();
    if has_type_params(&generics) {
        let clause = generics.make_where_clause();
        for field in &own {
            let ty = &field.ty;
            clause
                .predicates
                .push(parse_quote!(#ty: ::streamable::Field));
        }
        if let Some(base) = base {
            let ty = &base.ty;
            clause
                .predicates
                .push(parse_quote!(#ty: ::streamable::Streamable));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (base_ty, base_ref) = match base {
        Some(field) => {
            let ty = &field.ty;
            let member = &field.member;
            (quote! { #ty }, quote! { &self.#member })
        }
        None => (quote! { () }, quote! { &() }),
    };

    let own_members: Vec<&Member> = own.iter().map(|f| &f.member).collect();
    let own_types: Vec<&Type> = own.iter().map(|f| &f.ty).collect();
    let own_locals: Vec<Ident> = own.iter().map(|f| local_for(&f.member)).collect();

    let inits = fields.iter().map(|field| {
        let member = &field.member;
        match field.role {
            FieldRole::Own => {
                let local = local_for(member);
                quote! { #member: #local }
            }
            FieldRole::Base => quote! { #member: base },
            FieldRole::Skip => quote! { #member: ::core::default::Default::default() },
        }
    });

    // `base` is unused by roots; bind it with an underscore there.
    let base_param = if base.is_some() {
        quote! { base }
    } else {
        quote! { _base }
    };

    Ok(quote! {
        impl #impl_generics ::streamable::Streamable for #name #ty_generics #where_clause {
            type Base = #base_ty;

            #[inline]
            fn base(&self) -> &Self::Base {
                #base_ref
            }

            fn own_size(&self) -> usize {
                0usize #( + ::streamable::Field::encoded_size(&self.#own_members) )*
            }

            #[allow(unused_variables)]
            fn write_own(&self, writer: &mut ::streamable::StreamWriter) {
                #( ::streamable::Field::write_field(&self.#own_members, writer); )*
            }

            #[allow(unused_variables)]
            fn read_own(
                reader: &mut ::streamable::StreamReader<'_>,
                #base_param: Self::Base,
            ) -> Self {
                #( let #own_locals = <#own_types as ::streamable::Field>::read_field(reader); )*
                Self { #( #inits ),* }
            }
        }
    })
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo>> {
    let mut infos = Vec::new();
    let mut base_seen = false;

    for (index, field) in fields.iter().enumerate() {
        let role = parse_role(&field.attrs)?;
        if role == FieldRole::Base {
            if base_seen {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field can be marked #[streamable(base)]",
                ));
            }
            base_seen = true;
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(index.into()),
        };
        infos.push(FieldInfo {
            member,
            ty: field.ty.clone(),
            role,
        });
    }
    Ok(infos)
}

fn parse_role(attrs: &[Attribute]) -> syn::Result<FieldRole> {
    let mut role = FieldRole::Own;
    for attr in attrs {
        if !attr.path().is_ident("streamable") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let next = if meta.path.is_ident("base") {
                FieldRole::Base
            } else if meta.path.is_ident("skip") {
                FieldRole::Skip
            } else {
                return Err(meta.error("expected `base` or `skip`"));
            };
            if role != FieldRole::Own && role != next {
                return Err(meta.error("`base` and `skip` are mutually exclusive"));
            }
            role = next;
            Ok(())
        })?;
    }
    Ok(role)
}

fn local_for(member: &Member) -> Ident {
    match member {
        Member::Named(ident) => format_ident!("__field_{}", ident),
        Member::Unnamed(index) => format_ident!("__field_{}", index.index),
    }
}

fn has_type_params(generics: &Generics) -> bool {
    generics.type_params().next().is_some()
}

// ============================================================================
// FixedLayout
// ============================================================================

fn expand_fixed_struct(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let fields = collect_fields(&data.fields)?;
    if let Some(field) = fields.iter().find(|f| f.role != FieldRole::Own) {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "#[streamable(..)] attributes have no meaning on FixedLayout fields",
        ));
    }

    let mut generics = input.generics.clone();
    if has_type_params(&generics) {
        let clause = generics.make_where_clause();
        for field in &fields {
            let ty = &field.ty;
            clause
                .predicates
                .push(parse_quote!(#ty: ::streamable::FixedLayout));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let members: Vec<&Member> = fields.iter().map(|f| &f.member).collect();
    let types: Vec<&Type> = fields.iter().map(|f| &f.ty).collect();
    let locals: Vec<Ident> = fields.iter().map(|f| local_for(&f.member)).collect();

    let construct = match &data.fields {
        Fields::Named(_) => quote! { Self { #( #members: #locals ),* } },
        Fields::Unnamed(_) => quote! { Self( #( #locals ),* ) },
        Fields::Unit => quote! { Self },
    };
    let construct_zeroed = match &data.fields {
        Fields::Named(_) => quote! {
            Self { #( #members: <#types as ::streamable::FixedLayout>::zeroed() ),* }
        },
        Fields::Unnamed(_) => quote! {
            Self( #( <#types as ::streamable::FixedLayout>::zeroed() ),* )
        },
        Fields::Unit => quote! { Self },
    };

    let layout = quote! {
        impl #impl_generics ::streamable::FixedLayout for #name #ty_generics #where_clause {
            const SIZE: usize = 0usize #( + <#types as ::streamable::FixedLayout>::SIZE )*;

            #[allow(unused_variables)]
            fn store(&self, out: &mut ::std::vec::Vec<u8>) {
                #( ::streamable::FixedLayout::store(&self.#members, out); )*
            }

            #[allow(unused_variables, unused_mut, unused_assignments)]
            fn load(src: &[u8]) -> Self {
                let mut offset = 0usize;
                #(
                    let width = <#types as ::streamable::FixedLayout>::SIZE;
                    let #locals = <#types as ::streamable::FixedLayout>::load(
                        &src[offset..offset + width],
                    );
                    offset += width;
                )*
                #construct
            }

            fn zeroed() -> Self {
                #construct_zeroed
            }

            #[allow(unused_variables, unused_mut, unused_assignments)]
            fn is_valid(src: &[u8]) -> bool {
                let mut offset = 0usize;
                #(
                    let width = <#types as ::streamable::FixedLayout>::SIZE;
                    if !<#types as ::streamable::FixedLayout>::is_valid(&src[offset..offset + width]) {
                        return false;
                    }
                    offset += width;
                )*
                true
            }
        }
    };

    let field_impl = fixed_field_impl(name, &generics);
    Ok(quote! {
        #layout
        #field_impl
    })
}

fn expand_fixed_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "FixedLayout enums cannot be generic",
        ));
    }
    let repr = enum_repr(&input.attrs)?.ok_or_else(|| {
        syn::Error::new_spanned(
            input,
            "FixedLayout enums need an explicit integer #[repr(..)]",
        )
    })?;

    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "FixedLayout enums must be fieldless",
            ));
        }
        variants.push(&variant.ident);
    }
    let Some(first) = variants.first() else {
        return Err(syn::Error::new_spanned(
            input,
            "FixedLayout cannot be derived for an enum with no variants",
        ));
    };

    let type_name = name.to_string();
    let layout = quote! {
        impl ::streamable::FixedLayout for #name {
            const SIZE: usize = <#repr as ::streamable::FixedLayout>::SIZE;

            fn store(&self, out: &mut ::std::vec::Vec<u8>) {
                let raw: #repr = match self {
                    #( Self::#variants => Self::#variants as #repr, )*
                };
                ::streamable::FixedLayout::store(&raw, out);
            }

            fn load(src: &[u8]) -> Self {
                let raw = <#repr as ::streamable::FixedLayout>::load(src);
                #(
                    if raw == Self::#variants as #repr {
                        return Self::#variants;
                    }
                )*
                debug_assert!(false, "invalid {} discriminant {}", #type_name, raw);
                Self::#first
            }

            fn zeroed() -> Self {
                Self::#first
            }

            fn is_valid(src: &[u8]) -> bool {
                let raw = <#repr as ::streamable::FixedLayout>::load(src);
                false #( || raw == Self::#variants as #repr )*
            }
        }
    };

    let field_impl = fixed_field_impl(name, &input.generics);
    Ok(quote! {
        #layout
        #field_impl
    })
}

fn fixed_field_impl(name: &Ident, generics: &Generics) -> TokenStream2 {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        impl #impl_generics ::streamable::Field for #name #ty_generics #where_clause {
            const CATEGORY: ::streamable::Category = ::streamable::Category::Fixed;

            #[inline]
            fn encoded_size(&self) -> usize {
                <Self as ::streamable::FixedLayout>::SIZE
            }

            #[inline]
            fn write_field(&self, writer: &mut ::streamable::StreamWriter) {
                writer.write_fixed(self);
            }

            #[inline]
            fn read_field(reader: &mut ::streamable::StreamReader<'_>) -> Self {
                reader.read_fixed::<Self>()
            }
        }
    }
}

/// Integer type named by `#[repr(..)]`, if any.
fn enum_repr(attrs: &[Attribute]) -> syn::Result<Option<Ident>> {
    const INTEGERS: [&str; 12] = [
        "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize",
    ];

    let mut repr = None;
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                if INTEGERS.contains(&ident.to_string().as_str()) {
                    repr = Some(ident.clone());
                }
            }
            // Skip the arguments of `repr(align(..))` and `repr(packed(..))`.
            if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                content.parse::<TokenStream2>()?;
            }
            Ok(())
        })?;
    }
    Ok(repr)
}
