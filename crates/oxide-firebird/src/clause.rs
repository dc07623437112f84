//! Clause renderers Firebird overrides.

use std::collections::HashMap;

use oxide_dialect::clause::{self, Builder, Clause, ClauseBuilder, Expression};

/// Returns the clause renderers installed by the dialect.
pub(crate) fn clause_builders() -> HashMap<&'static str, ClauseBuilder> {
    let mut builders: HashMap<&'static str, ClauseBuilder> = HashMap::new();
    builders.insert(clause::LIMIT, build_limit);
    builders
}

/// Renders pagination as `ROWS n [TO m]`.
///
/// Firebird has no `LIMIT`/`OFFSET` keywords. Expressions other than a
/// limit render nothing.
pub fn build_limit(clause: &Clause, builder: &mut dyn Builder) {
    if let Expression::Limit(limit) = &clause.expression {
        builder.write_sql("ROWS ");
        builder.write_sql(&limit.limit.to_string());
        if limit.offset > 0 {
            builder.write_sql(" TO ");
            builder.write_sql(&limit.offset.to_string());
        }
    }
}
