pub type Lit = i32;

pub type Var = u32;

pub type Clause = Vec<Lit>;

pub fn to_var(lit: Lit) -> Var {
    lit.unsigned_abs()
}

/// A parsed CNF formula.
///
/// `var_count` and `clause_count` are taken from the problem line as-is
/// (`None` when the token is not a count) and never used to size or check
/// `clauses`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    pub var_count: Option<usize>,
    pub clause_count: Option<usize>,
    pub clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(var_count: Option<usize>, clause_count: Option<usize>) -> Self {
        Formula {
            var_count,
            clause_count,
            clauses: vec![],
        }
    }

    /// Whether the problem line declares exactly as many clauses as were parsed.
    pub fn is_consistent(&self) -> bool {
        self.clause_count == Some(self.clauses.len())
    }
}
