use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ast::ast::EType;

pub type ScopeRef = Rc<RefCell<Scope>>;
pub type ScopeWeak = Weak<RefCell<Scope>>;

pub type RecordRef = Rc<RefCell<DeclarationRecord>>;
pub type RecordWeak = Weak<RefCell<DeclarationRecord>>;

// Scope ids are unique for the whole process so trees from separate
// compilations never alias.
static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

fn generate_next_id() -> u64 {
    NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed) + 1
}

/// A named, typed binding owned by exactly one scope. Variable nodes keep
/// weak handles to the record that resolved them.
#[derive(Debug)]
pub struct DeclarationRecord {
    pub scope: ScopeWeak,
    pub name: String,
    pub ty: EType,
}

/// A lexical binding environment: an ordered list of declarations plus an
/// optional parent. Scopes only ever grow; nothing is removed.
#[derive(Debug)]
pub struct Scope {
    pub id: u64,
    pub parent: ScopeWeak,
    pub declarations: Vec<RecordRef>,
}

impl Scope {
    pub fn new_root() -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            id: generate_next_id(),
            parent: Weak::new(),
            declarations: vec![],
        }))
    }

    pub fn child_of(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            id: generate_next_id(),
            parent: Rc::downgrade(parent),
            declarations: vec![],
        }))
    }

    /// Appends a declaration to `scope` and returns the shared record.
    pub fn add(scope: &ScopeRef, name: &str, ty: EType) -> RecordRef {
        let record = Rc::new(RefCell::new(DeclarationRecord {
            scope: Rc::downgrade(scope),
            name: name.to_string(),
            ty,
        }));
        scope.borrow_mut().declarations.push(Rc::clone(&record));
        record
    }

    /// This scope's own matches for `name`, in declaration order.
    pub fn get(&self, name: &str) -> Vec<RecordRef> {
        self.declarations
            .iter()
            .filter(|record| record.borrow().name == name)
            .cloned()
            .collect()
    }

    /// All matches for `name`, innermost first: own matches, then the
    /// parent's, recursively. The first entry is the binding to use.
    pub fn find(&self, name: &str) -> Vec<RecordRef> {
        let mut results = self.get(name);
        if let Some(parent) = self.parent.upgrade() {
            results.extend(parent.borrow().find(name));
        }
        results
    }
}
