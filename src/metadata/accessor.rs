use super::detect::detect_framework_version;
use super::types::{full_name, MethodFlags, ModuleMetadata, RawAttribute, TypeDef};
use crate::policy::FrameworkVersion;
use std::collections::HashMap;

/// Handle to a type declared in one of the modules of a [`ModuleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle {
    pub module: usize,
    pub index: usize,
}

/// Handle to a method declared on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodHandle {
    pub ty: TypeHandle,
    pub index: usize,
}

/// Anything that can carry custom attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOwner {
    Type(TypeHandle),
    Method(MethodHandle),
}

impl From<TypeHandle> for AttributeOwner {
    fn from(handle: TypeHandle) -> Self {
        AttributeOwner::Type(handle)
    }
}

impl From<MethodHandle> for AttributeOwner {
    fn from(handle: MethodHandle) -> Self {
        AttributeOwner::Method(handle)
    }
}

/// The declared base type of a type.
///
/// `definition` is present only when the base is declared somewhere in the
/// loaded module set; framework base classes usually are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseType<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub definition: Option<TypeHandle>,
}

/// Read access to the metadata of one loaded module.
///
/// Handles that do not resolve yield empty values rather than panicking so
/// that a malformed dump degrades to "nothing found".
pub trait MetadataAccessor {
    fn module_name(&self) -> &str;
    fn types(&self) -> Vec<TypeHandle>;
    fn type_name(&self, ty: TypeHandle) -> &str;
    fn type_namespace(&self, ty: TypeHandle) -> &str;
    fn is_abstract(&self, ty: TypeHandle) -> bool;
    fn base_type(&self, ty: TypeHandle) -> Option<BaseType<'_>>;
    fn methods(&self, ty: TypeHandle) -> Vec<MethodHandle>;
    fn method_name(&self, method: MethodHandle) -> &str;
    fn method_flags(&self, method: MethodHandle) -> MethodFlags;
    fn custom_attributes(&self, owner: AttributeOwner) -> &[RawAttribute];
    fn framework_version(&self) -> FrameworkVersion;
}

/// Every module loaded for one analysis run.
///
/// Base type references are resolved by full name across all modules, so a
/// controller may derive from a base class declared in a sibling module.
#[derive(Debug, Default)]
pub struct ModuleSet {
    modules: Vec<ModuleMetadata>,
    by_full_name: HashMap<String, TypeHandle>,
}

impl ModuleSet {
    pub fn new(modules: Vec<ModuleMetadata>) -> Self {
        let mut set = Self::default();
        for module in modules {
            set.push(module);
        }
        set
    }

    /// Add a module, returning its index. The first declaration of a full
    /// name wins when modules overlap.
    pub fn push(&mut self, module: ModuleMetadata) -> usize {
        let module_index = self.modules.len();
        for (index, ty) in module.types.iter().enumerate() {
            self.by_full_name
                .entry(ty.full_name())
                .or_insert(TypeHandle {
                    module: module_index,
                    index,
                });
        }
        self.modules.push(module);
        module_index
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn module(&self, index: usize) -> Option<&ModuleMetadata> {
        self.modules.get(index)
    }

    pub fn view(&self, module: usize) -> Option<ModuleView<'_>> {
        (module < self.modules.len()).then_some(ModuleView { set: self, module })
    }

    pub fn views(&self) -> impl Iterator<Item = ModuleView<'_>> {
        (0..self.modules.len()).map(move |module| ModuleView { set: self, module })
    }

    pub fn resolve(&self, namespace: &str, name: &str) -> Option<TypeHandle> {
        self.by_full_name.get(&full_name(namespace, name)).copied()
    }

    fn type_def(&self, ty: TypeHandle) -> Option<&TypeDef> {
        self.modules.get(ty.module)?.types.get(ty.index)
    }
}

/// [`MetadataAccessor`] over a single module of a [`ModuleSet`].
#[derive(Debug, Clone, Copy)]
pub struct ModuleView<'a> {
    set: &'a ModuleSet,
    module: usize,
}

impl<'a> ModuleView<'a> {
    pub fn metadata(&self) -> Option<&'a ModuleMetadata> {
        self.set.module(self.module)
    }

    pub fn index(&self) -> usize {
        self.module
    }
}

impl MetadataAccessor for ModuleView<'_> {
    fn module_name(&self) -> &str {
        self.metadata().map(|m| m.name.as_str()).unwrap_or_default()
    }

    fn types(&self) -> Vec<TypeHandle> {
        let count = self.metadata().map(|m| m.types.len()).unwrap_or(0);
        (0..count)
            .map(|index| TypeHandle {
                module: self.module,
                index,
            })
            .collect()
    }

    fn type_name(&self, ty: TypeHandle) -> &str {
        self.set
            .type_def(ty)
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }

    fn type_namespace(&self, ty: TypeHandle) -> &str {
        self.set
            .type_def(ty)
            .map(|t| t.namespace.as_str())
            .unwrap_or_default()
    }

    fn is_abstract(&self, ty: TypeHandle) -> bool {
        self.set.type_def(ty).is_some_and(|t| t.is_abstract)
    }

    fn base_type(&self, ty: TypeHandle) -> Option<BaseType<'_>> {
        let base = self.set.type_def(ty)?.base.as_ref()?;
        Some(BaseType {
            name: &base.name,
            namespace: &base.namespace,
            definition: self.set.resolve(&base.namespace, &base.name),
        })
    }

    fn methods(&self, ty: TypeHandle) -> Vec<MethodHandle> {
        let count = self.set.type_def(ty).map(|t| t.methods.len()).unwrap_or(0);
        (0..count).map(|index| MethodHandle { ty, index }).collect()
    }

    fn method_name(&self, method: MethodHandle) -> &str {
        self.set
            .type_def(method.ty)
            .and_then(|t| t.methods.get(method.index))
            .map(|m| m.name.as_str())
            .unwrap_or_default()
    }

    fn method_flags(&self, method: MethodHandle) -> MethodFlags {
        self.set
            .type_def(method.ty)
            .and_then(|t| t.methods.get(method.index))
            .map(|m| m.flags)
            .unwrap_or_default()
    }

    fn custom_attributes(&self, owner: AttributeOwner) -> &[RawAttribute] {
        let attributes = match owner {
            AttributeOwner::Type(ty) => self.set.type_def(ty).map(|t| t.attributes.as_slice()),
            AttributeOwner::Method(method) => self
                .set
                .type_def(method.ty)
                .and_then(|t| t.methods.get(method.index))
                .map(|m| m.attributes.as_slice()),
        };
        attributes.unwrap_or_default()
    }

    fn framework_version(&self) -> FrameworkVersion {
        self.metadata()
            .map(detect_framework_version)
            .unwrap_or(FrameworkVersion::Unknown)
    }
}
