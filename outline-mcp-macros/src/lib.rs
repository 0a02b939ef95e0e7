use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, AttributeArgs, FnArg, GenericArgument, ItemFn, Lit, Meta, NestedMeta, Pat,
    PathArguments, Type,
};
use proc_macro_crate::{crate_name, FoundCrate};

/// Resolve host crate path (equivalent to `$crate`)
fn host_crate() -> proc_macro2::TokenStream {
    match crate_name("outline-mcp") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
            quote!(::#ident)
        }
        Err(_) => quote!(::outline_mcp),
    }
}

/// Metadata attached to one parameter through `params(...)`.
#[derive(Default)]
struct ParamMeta {
    name: String,
    description: String,
    default: Option<Lit>,
    one_of: Vec<String>,
    kind: Option<String>,
}

fn parse_param(nested: NestedMeta) -> Result<ParamMeta, syn::Error> {
    match nested {
        // field = "description"
        NestedMeta::Meta(Meta::NameValue(nv)) => {
            let ident = nv
                .path
                .get_ident()
                .ok_or_else(|| syn::Error::new_spanned(&nv.path, "expected a parameter name"))?;
            match &nv.lit {
                Lit::Str(s) => Ok(ParamMeta {
                    name: ident.to_string(),
                    description: s.value(),
                    ..ParamMeta::default()
                }),
                other => Err(syn::Error::new_spanned(other, "description must be a string")),
            }
        }
        // field(description = "...", default = true, one_of("A", "B"), kind = "string")
        NestedMeta::Meta(Meta::List(list)) => {
            let ident = list
                .path
                .get_ident()
                .ok_or_else(|| syn::Error::new_spanned(&list.path, "expected a parameter name"))?;
            let mut meta = ParamMeta {
                name: ident.to_string(),
                ..ParamMeta::default()
            };
            for item in list.nested {
                match item {
                    NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("description") => {
                        match nv.lit {
                            Lit::Str(s) => meta.description = s.value(),
                            other => {
                                return Err(syn::Error::new_spanned(
                                    other,
                                    "description must be a string",
                                ));
                            }
                        }
                    }
                    NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("default") => {
                        meta.default = Some(nv.lit);
                    }
                    NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("kind") => {
                        match nv.lit {
                            Lit::Str(s) => meta.kind = Some(s.value()),
                            other => {
                                return Err(syn::Error::new_spanned(other, "kind must be a string"));
                            }
                        }
                    }
                    NestedMeta::Meta(Meta::List(values)) if values.path.is_ident("one_of") => {
                        for value in values.nested {
                            match value {
                                NestedMeta::Lit(Lit::Str(s)) => meta.one_of.push(s.value()),
                                other => {
                                    return Err(syn::Error::new_spanned(
                                        other,
                                        "one_of only accepts string literals",
                                    ));
                                }
                            }
                        }
                    }
                    other => {
                        return Err(syn::Error::new_spanned(other, "unsupported parameter option"));
                    }
                }
            }
            Ok(meta)
        }
        other => Err(syn::Error::new_spanned(other, "unsupported params entry")),
    }
}

#[proc_macro_attribute]
pub fn tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as AttributeArgs);
    let input_fn = parse_macro_input!(item as ItemFn);

    let mut name_override = None;
    let mut description = None;
    let mut params_meta = Vec::<ParamMeta>::new();

    for nested in args {
        match nested {
            NestedMeta::Meta(Meta::NameValue(nv)) => {
                if let Some(ident) = nv.path.get_ident() {
                    if let Lit::Str(s) = nv.lit {
                        match ident.to_string().as_str() {
                            "name" => name_override = Some(s.value()),
                            "description" => description = Some(s.value()),
                            _ => {}
                        }
                    }
                }
            }
            NestedMeta::Meta(Meta::List(list)) if list.path.is_ident("params") => {
                for nm in list.nested {
                    match parse_param(nm) {
                        Ok(meta) => params_meta.push(meta),
                        Err(e) => return e.to_compile_error().into(),
                    }
                }
            }
            _ => {}
        }
    }

    let description = match description {
        Some(d) => d,
        None => {
            return syn::Error::new_spanned(
                &input_fn.sig.ident,
                "tool requires `description = \"...\"`",
            )
            .to_compile_error()
            .into();
        }
    };

    let fn_ident = input_fn.sig.ident.clone();
    let fn_name = fn_ident.to_string();
    let tool_name = name_override.unwrap_or(fn_name.clone());

    let mut inputs = input_fn.sig.inputs.iter();

    // The first argument receives the shared remote client.
    match inputs.next() {
        Some(FnArg::Typed(pt)) if matches!(&*pt.ty, Type::Reference(_)) => {}
        Some(other) => {
            return syn::Error::new_spanned(
                other,
                "the first argument must be the remote client reference",
            )
            .to_compile_error()
            .into();
        }
        None => {
            return syn::Error::new_spanned(
                &input_fn.sig,
                "tool functions take the remote client as their first argument",
            )
            .to_compile_error()
            .into();
        }
    }

    let mut fields = Vec::new();
    let mut param_names = Vec::new();

    for arg in inputs {
        match arg {
            FnArg::Typed(pt) => {
                if let Pat::Ident(pi) = &*pt.pat {
                    fields.push((pi.ident.clone(), (*pt.ty).clone()));
                    param_names.push(pi.ident.to_string());
                } else {
                    return syn::Error::new_spanned(
                        &pt.pat,
                        "only simple identifiers are supported",
                    )
                    .to_compile_error()
                    .into();
                }
            }
            FnArg::Receiver(_) => {
                return syn::Error::new_spanned(
                    arg,
                    "methods with self are not supported",
                )
                .to_compile_error()
                .into();
            }
        }
    }

    for meta in &params_meta {
        if !param_names.contains(&meta.name) {
            return syn::Error::new_spanned(
                &input_fn.sig.ident,
                format!("param '{}' not found in function signature", meta.name),
            )
            .to_compile_error()
            .into();
        }
    }

    let params_struct_ident =
        syn::Ident::new(&format!("{}Params", pascal_case(&fn_name)), fn_ident.span());
    let tool_struct_ident =
        syn::Ident::new(&format!("{}Tool", pascal_case(&fn_name)), fn_ident.span());

    let host = host_crate();

    let field_defs = fields.iter().map(|(id, ty)| {
        quote!(pub #id: #ty)
    });

    let args_entries = fields.iter().map(|(ident, ty)| {
        let meta = match params_meta.iter().find(|m| m.name == ident.to_string()) {
            Some(meta) if !meta.description.is_empty() => meta,
            _ => {
                return syn::Error::new_spanned(
                    ident,
                    format!("missing description for param '{}'", ident),
                )
                .to_compile_error();
            }
        };

        let (required, value_ty) = match option_inner(ty) {
            Some(inner) => (false, inner),
            None => (true, ty),
        };
        let arg_type = meta
            .kind
            .clone()
            .unwrap_or_else(|| infer_json_type(value_ty).to_string());

        let name_lit = syn::LitStr::new(&camel_case(&ident.to_string()), ident.span());
        let desc_lit = syn::LitStr::new(&meta.description, ident.span());
        let type_lit = syn::LitStr::new(&arg_type, ident.span());

        let enum_values = if meta.one_of.is_empty() {
            quote!(None)
        } else {
            let values = meta.one_of.iter();
            quote!(Some(vec![#(#values.to_string()),*]))
        };
        let default = match &meta.default {
            Some(lit) => quote!(Some(#host::serde_json::json!(#lit))),
            None => quote!(None),
        };

        quote! {
            #host::tools::traits::ArgSchema {
                name: #name_lit.into(),
                arg_type: #type_lit.into(),
                description: #desc_lit.into(),
                required: #required,
                enum_values: #enum_values,
                default: #default,
            }
        }
    });

    let call_args = fields.iter().map(|(id, _)| quote!(params.#id));
    let is_async = input_fn.sig.asyncness.is_some();

    let run_body = if is_async {
        quote! {
            let params: #params_struct_ident =
                #host::serde_json::from_value(input)
                    .map_err(|e| #host::tools::error::ToolError::ParamsNotMatched(e.to_string()))?;
            #fn_ident(client, #(#call_args),*).await
        }
    } else {
        quote! {
            let params: #params_struct_ident =
                #host::serde_json::from_value(input)
                    .map_err(|e| #host::tools::error::ToolError::ParamsNotMatched(e.to_string()))?;
            #fn_ident(client, #(#call_args),*)
        }
    };

    let expanded = quote! {
        #input_fn

        #[derive(#host::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct #params_struct_ident {
            #(#field_defs,)*
        }

        pub struct #tool_struct_ident;

        #[#host::async_trait::async_trait]
        impl #host::tools::traits::Tool for #tool_struct_ident {
            fn name(&self) -> &str { #tool_name }
            fn description(&self) -> &str { #description }
            fn args(&self) -> Vec<#host::tools::traits::ArgSchema> {
                vec![#(#args_entries),*]
            }
            async fn run(
                &self,
                client: &dyn #host::client::traits::RemoteApi,
                input: #host::serde_json::Value,
            ) -> Result<#host::serde_json::Value, #host::tools::error::ToolError> {
                #run_body
            }
        }
    };

    TokenStream::from(expanded)
}

fn pascal_case(s: &str) -> String {
    s.split('_')
        .map(|p| {
            let mut c = p.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

/// `parent_document_id` -> `parentDocumentId`, matching serde's `camelCase`.
fn camel_case(s: &str) -> String {
    let pascal = pascal_case(s);
    let mut c = pascal.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_lowercase().collect::<String>() + c.as_str(),
    }
}

/// Returns `T` for `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(p) = ty else {
        return None;
    };
    let segment = p.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

fn infer_json_type(ty: &Type) -> &'static str {
    match ty {
        Type::Path(p) => {
            let ident = match p.path.segments.last() {
                Some(segment) => segment.ident.to_string(),
                None => return "object",
            };
            match ident.as_str() {
                "String" => "string",
                "bool" => "boolean",
                "i8" | "i16" | "i32" | "i64" |
                "u8" | "u16" | "u32" | "u64" |
                "usize" | "isize" => "integer",
                "f32" | "f64" | "Number" => "number",
                "Vec" => "array",
                _ => "object",
            }
        }
        _ => "object",
    }
}
