//! Mapping between local column indices and external variable ids.

use rustc_hash::FxHashMap;

/// External id of variables with no identity outside the matrix, such as
/// auxiliary slack columns.
pub const NO_EXTERNAL: usize = usize::MAX;

/// What the register knows about one local variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtVarInfo {
    external: usize,
    is_integer: bool,
    name: String,
}

impl ExtVarInfo {
    /// Create the info for `external` with an empty name.
    pub fn new(external: usize, is_integer: bool) -> Self {
        Self {
            external,
            is_integer,
            name: String::new(),
        }
    }

    /// External id, or [`NO_EXTERNAL`].
    pub fn external(&self) -> usize {
        self.external
    }

    /// Whether the variable is integer-typed.
    pub fn is_integer(&self) -> bool {
        self.is_integer
    }

    /// Display name, empty if never set.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Registry of local variables.
///
/// Local ids are dense (`0..size()`) and line up with matrix columns. The
/// register and the matrix are separate stores: a driver popping the matrix
/// back to `n` columns calls [`shrink(n)`](Self::shrink) in the same step.
#[derive(Debug, Clone, Default)]
pub struct VarRegister {
    local_to_external: Vec<ExtVarInfo>,
    external_to_local: FxHashMap<usize, usize>,
}

impl VarRegister {
    /// Create an empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `external` and return its local id.
    ///
    /// An already registered external id returns its existing local id.
    /// [`NO_EXTERNAL`] always creates a fresh local variable.
    pub fn add_var(&mut self, external: usize, is_integer: bool) -> usize {
        if external != NO_EXTERNAL {
            if let Some(&local) = self.external_to_local.get(&external) {
                return local;
            }
        }
        let local = self.local_to_external.len();
        self.local_to_external
            .push(ExtVarInfo::new(external, is_integer));
        if external != NO_EXTERNAL {
            self.external_to_local.insert(external, local);
        }
        local
    }

    /// External id of `local`, or [`NO_EXTERNAL`] when out of range.
    pub fn local_to_external(&self, local: usize) -> usize {
        self.local_to_external
            .get(local)
            .map_or(NO_EXTERNAL, ExtVarInfo::external)
    }

    /// Local id of a registered external id.
    ///
    /// # Panics
    ///
    /// Panics if `external` was never registered. Use
    /// [`external_lookup`](Self::external_lookup) to probe.
    pub fn external_to_local(&self, external: usize) -> usize {
        match self.external_to_local.get(&external) {
            Some(&local) => local,
            None => panic!("external variable {external} is not registered"),
        }
    }

    /// Returns `true` if `external` is registered.
    pub fn external_is_used(&self, external: usize) -> bool {
        self.external_to_local.contains_key(&external)
    }

    /// Local id of `external`, if registered.
    pub fn external_lookup(&self, external: usize) -> Option<usize> {
        self.external_to_local.get(&external).copied()
    }

    /// Local id and integrality of `external`, if registered.
    pub fn external_lookup_with_int(&self, external: usize) -> Option<(usize, bool)> {
        self.external_lookup(external)
            .map(|local| (local, self.local_to_external[local].is_integer))
    }

    /// Drop every local id `>= new_size`.
    pub fn shrink(&mut self, new_size: usize) {
        for info in self.local_to_external.iter().skip(new_size) {
            self.external_to_local.remove(&info.external);
        }
        self.local_to_external.truncate(new_size);
    }

    /// Returns `true` if any registered variable is integer-typed.
    pub fn has_int_var(&self) -> bool {
        self.local_to_external.iter().any(ExtVarInfo::is_integer)
    }

    /// Whether local variable `j` is integer-typed.
    pub fn local_is_int(&self, j: usize) -> bool {
        self.local_to_external[j].is_integer
    }

    /// Number of local variables.
    pub fn size(&self) -> usize {
        self.local_to_external.len()
    }

    /// Forget every variable.
    pub fn clear(&mut self) {
        self.local_to_external.clear();
        self.external_to_local.clear();
    }

    /// External ids indexed by local id.
    pub fn vars(&self) -> Vec<usize> {
        self.local_to_external.iter().map(ExtVarInfo::external).collect()
    }

    /// Info of local variable `j`.
    pub fn info(&self, j: usize) -> &ExtVarInfo {
        &self.local_to_external[j]
    }

    /// Name local variable `j`.
    pub fn set_name(&mut self, j: usize, name: impl Into<String>) {
        self.local_to_external[j].name = name.into();
    }

    /// Name of local variable `j`, empty if never set.
    pub fn get_name(&self, j: usize) -> &str {
        &self.local_to_external[j].name
    }
}
