//! Entity and relation declarations.
//!
//! Declarations are plain `'static` data. Every join is spelled out with its
//! key columns; nothing is inferred from naming conventions.

use serde::Serialize;

/// One entity bound to one storage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityDef {
    /// Entity name, used for lookups and relation targets.
    pub name: &'static str,
    /// Physical table name, matched exactly including case.
    pub table: &'static str,
    /// Identifier columns. Join entities use both foreign keys.
    pub primary_key: &'static [&'static str],
    /// Direct attribute columns, primary key included, in read order.
    pub columns: &'static [&'static str],
    /// Relations owned by this entity.
    pub relations: &'static [Relation],
}

impl EntityDef {
    /// Looks up a relation by name.
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|relation| relation.name == name)
    }

    /// Returns whether `column` is one of the declared columns.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// Position of `column` within [`EntityDef::columns`].
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Returns whether the entity is identified by more than one column.
    pub fn has_composite_key(&self) -> bool {
        self.primary_key.len() > 1
    }
}

/// A named relationship from one entity to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relation {
    /// Relation name, unique within the owning entity.
    pub name: &'static str,
    /// Entity on the other end.
    pub target: &'static str,
    /// How the two ends are keyed.
    #[serde(flatten)]
    pub kind: RelationKind,
}

/// Key layout of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationKind {
    /// One-to-many: `target.foreign_key = owner.owner_key`.
    HasMany {
        /// Column on the target.
        foreign_key: &'static str,
        /// Column on the owner, usually its primary key.
        owner_key: &'static str,
    },
    /// Many-to-one: `owner.foreign_key = target.target_key`.
    BelongsTo {
        /// Column on the owner.
        foreign_key: &'static str,
        /// Column on the target, usually its primary key.
        target_key: &'static str,
    },
    /// Many-to-many through a join entity.
    ManyToMany(JoinSpec),
}

/// Explicit join specification for a many-to-many relation.
///
/// Rows of `join` link `owner.owner_key = join.left_key` with
/// `join.right_key = target.target_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinSpec {
    /// Name of the join entity.
    pub join: &'static str,
    /// Join column referencing the owner.
    pub left_key: &'static str,
    /// Join column referencing the target.
    pub right_key: &'static str,
    /// Owner column referenced by `left_key`.
    pub owner_key: &'static str,
    /// Target column referenced by `right_key`.
    pub target_key: &'static str,
}

impl Relation {
    /// Declares a one-to-many relation: `target.foreign_key = owner.owner_key`.
    pub const fn has_many(
        name: &'static str,
        target: &'static str,
        foreign_key: &'static str,
        owner_key: &'static str,
    ) -> Self {
        Self {
            name,
            target,
            kind: RelationKind::HasMany {
                foreign_key,
                owner_key,
            },
        }
    }

    /// Declares a many-to-one relation: `owner.foreign_key = target.target_key`.
    pub const fn belongs_to(
        name: &'static str,
        target: &'static str,
        foreign_key: &'static str,
        target_key: &'static str,
    ) -> Self {
        Self {
            name,
            target,
            kind: RelationKind::BelongsTo {
                foreign_key,
                target_key,
            },
        }
    }

    /// Declares a many-to-many relation through the join entity named in `join`.
    pub const fn many_to_many(name: &'static str, target: &'static str, join: JoinSpec) -> Self {
        Self {
            name,
            target,
            kind: RelationKind::ManyToMany(join),
        }
    }

    /// Returns whether traversal yields at most one row.
    pub fn is_to_one(&self) -> bool {
        matches!(self.kind, RelationKind::BelongsTo { .. })
    }

    /// The owner column whose value drives the traversal.
    pub fn owner_column(&self) -> &'static str {
        match self.kind {
            RelationKind::HasMany { owner_key, .. } => owner_key,
            RelationKind::BelongsTo { foreign_key, .. } => foreign_key,
            RelationKind::ManyToMany(join) => join.owner_key,
        }
    }
}
