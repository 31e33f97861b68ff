//! Symbol resolution surface and the per-run resolution context.

use waypoint_core::diagnostics::SourceLocation;

use super::attributes::AttributeRef;
use super::body::Body;
use super::types::{type_names_match, SymbolId, TypeRef};
use crate::outcomes::factory::ErrorFactoryTable;
use crate::outcomes::ErrorOutcome;

/// A compile-time constant value, for attribute arguments and const folding.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Str(String),
}

/// Kind of a referenced declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Method,
    Property,
    Field,
    Local,
    Const,
}

/// Everything the inferencer needs to know about one referenced symbol.
#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    /// Full name of the declaring type, when there is one.
    pub declaring_type: Option<String>,
    /// True when the member's return type is the result-union type.
    pub returns_result_union: bool,
    /// False for interface, abstract, and extern members.
    pub has_body: bool,
    /// True when declared in the compilation unit under analysis.
    pub same_unit: bool,
    /// Outcome declarations attached to the member itself.
    pub declared_outcomes: Vec<ErrorOutcome>,
    /// The constant value, for `SymbolKind::Const`.
    pub const_value: Option<ConstValue>,
    pub location: SourceLocation,
}

/// One member of a composite parameter type.
#[derive(Debug, Clone)]
pub struct CompositeMember {
    pub name: String,
    pub ty: TypeRef,
    pub attributes: Vec<AttributeRef>,
}

/// Shape of a composite parameter type: primary-constructor parameters in
/// declaration order, then public properties.
#[derive(Debug, Clone, Default)]
pub struct CompositeShape {
    pub ctor_params: Vec<CompositeMember>,
    pub properties: Vec<CompositeMember>,
}

/// The resolution service the host compiler provides.
///
/// This is the only channel to anything outside a handler's own model;
/// the pipeline never touches host internals directly.
pub trait SymbolResolver {
    /// Resolve a symbol id to its info.
    fn symbol(&self, id: SymbolId) -> Option<&SymbolInfo>;

    /// The lowered body of a declaration, when it has one.
    fn body(&self, id: SymbolId) -> Option<&Body>;

    /// Member shape of a composite parameter type.
    fn composite_shape(&self, type_name: &str) -> Option<&CompositeShape>;
}

/// Well-known runtime type names, matched with dotted-suffix tolerance.
#[derive(Debug, Clone)]
pub struct WellKnownTypes {
    pub cancellation_token: String,
    pub request_context: String,
    pub byte_stream: String,
    pub raw_reader: String,
    pub form_file: String,
    pub form_file_collection: String,
    pub form_collection: String,
}

impl Default for WellKnownTypes {
    fn default() -> Self {
        Self {
            cancellation_token: "System.Threading.CancellationToken".into(),
            request_context: "Endpoints.Http.RequestContext".into(),
            byte_stream: "System.IO.Stream".into(),
            raw_reader: "System.IO.PipeReader".into(),
            form_file: "Endpoints.Http.FormFile".into(),
            form_file_collection: "Endpoints.Http.FormFileCollection".into(),
            form_collection: "Endpoints.Http.FormCollection".into(),
        }
    }
}

/// Native alias / canonical name pairs for the simple (route- and
/// query-bindable) types.
const SIMPLE_TYPES: &[(&str, &str)] = &[
    ("int", "System.Int32"),
    ("long", "System.Int64"),
    ("short", "System.Int16"),
    ("byte", "System.Byte"),
    ("bool", "System.Boolean"),
    ("char", "System.Char"),
    ("double", "System.Double"),
    ("float", "System.Single"),
    ("decimal", "System.Decimal"),
    ("string", "System.String"),
    ("guid", "System.Guid"),
    ("datetime", "System.DateTime"),
    ("datetimeoffset", "System.DateTimeOffset"),
    ("timespan", "System.TimeSpan"),
    ("uri", "System.Uri"),
];

impl WellKnownTypes {
    pub fn is_cancellation(&self, ty: &TypeRef) -> bool {
        type_names_match(&ty.name, &self.cancellation_token)
    }

    pub fn is_request_context(&self, ty: &TypeRef) -> bool {
        type_names_match(&ty.name, &self.request_context)
    }

    pub fn is_byte_stream(&self, ty: &TypeRef) -> bool {
        type_names_match(&ty.name, &self.byte_stream)
    }

    pub fn is_raw_reader(&self, ty: &TypeRef) -> bool {
        type_names_match(&ty.name, &self.raw_reader)
    }

    pub fn is_form_file(&self, ty: &TypeRef) -> bool {
        type_names_match(&ty.name, &self.form_file)
    }

    pub fn is_form_file_collection(&self, ty: &TypeRef) -> bool {
        type_names_match(&ty.name, &self.form_file_collection)
            || ty
                .element
                .as_deref()
                .is_some_and(|el| type_names_match(&el.name, &self.form_file))
    }

    pub fn is_form_collection(&self, ty: &TypeRef) -> bool {
        type_names_match(&ty.name, &self.form_collection)
    }

    /// True for the primitive-ish types bindable from a string value.
    pub fn is_simple_type(&self, name: &str) -> bool {
        SIMPLE_TYPES
            .iter()
            .any(|(alias, canonical)| {
                type_names_match(name, alias) || type_names_match(name, canonical)
            })
    }

    pub fn is_string_type(&self, name: &str) -> bool {
        type_names_match(name, "string") || type_names_match(name, "System.String")
    }
}

/// Lookup tables built once per analysis run and threaded by reference
/// through every component. Never a process-wide singleton: two concurrent
/// runs against different targets must not share state.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    pub well_known: WellKnownTypes,
    pub factory: ErrorFactoryTable,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }
}
