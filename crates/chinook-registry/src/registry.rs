//! The typed registry holding one variant's entity declarations.

use std::collections::BTreeMap;

use chinook_types::Variant;
use rusqlite::Connection;
use serde::Serialize;

use crate::declarations::declarations;
use crate::entity::{EntityDef, Relation, RelationKind};
use crate::error::ConfigurationError;

/// An immutable, consistency-checked set of entity declarations.
#[derive(Debug, Clone)]
pub struct Registry {
    variant: Variant,
    entities: Vec<EntityDef>,
    by_name: BTreeMap<&'static str, usize>,
}

/// Collects declarations before they are checked for consistency.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    variant: Variant,
    entities: Vec<EntityDef>,
}

/// Serializable view of a registry.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDescription<'a> {
    pub variant: Variant,
    pub entities: &'a [EntityDef],
}

impl RegistryBuilder {
    /// Adds one declaration. Order is preserved.
    pub fn register(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Adds several declarations.
    pub fn register_all(mut self, entities: &[EntityDef]) -> Self {
        self.entities.extend_from_slice(entities);
        self
    }

    /// Checks every declaration against the others and freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found: duplicate entities,
    /// tables colliding case-insensitively, missing primary keys, duplicate
    /// relation names, unknown relation targets or join entities, and key
    /// columns not declared on the entity that must carry them.
    pub fn build(self) -> Result<Registry, ConfigurationError> {
        let mut by_name = BTreeMap::new();
        for (index, entity) in self.entities.iter().enumerate() {
            if by_name.insert(entity.name, index).is_some() {
                return Err(ConfigurationError::DuplicateEntity(entity.name.to_string()));
            }
        }

        // SQLite folds identifier case for ASCII letters only.
        let mut tables: BTreeMap<String, &'static str> = BTreeMap::new();
        for entity in &self.entities {
            if let Some(first) = tables.insert(entity.table.to_ascii_lowercase(), entity.name) {
                return Err(ConfigurationError::TableCollision {
                    first: first.to_string(),
                    second: entity.name.to_string(),
                    table: entity.table.to_string(),
                });
            }
        }

        let registry = Registry {
            variant: self.variant,
            entities: self.entities,
            by_name,
        };

        for entity in &registry.entities {
            registry.check_entity(entity)?;
        }

        tracing::debug!(
            variant = registry.variant.as_str(),
            entities = registry.entities.len(),
            "built relationship registry"
        );

        Ok(registry)
    }
}

impl Registry {
    /// Starts an empty registry for `variant`.
    pub fn builder(variant: Variant) -> RegistryBuilder {
        RegistryBuilder {
            variant,
            entities: Vec::new(),
        }
    }

    /// Builds the registry from the static declarations of `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the declarations are inconsistent.
    pub fn for_variant(variant: Variant) -> Result<Self, ConfigurationError> {
        Self::builder(variant)
            .register_all(declarations(variant))
            .build()
    }

    /// The variant these declarations belong to.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// All entities in registration order.
    pub fn entities(&self) -> &[EntityDef] {
        &self.entities
    }

    /// Looks up an entity by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::UnknownEntity` if `name` is not registered.
    pub fn entity(&self, name: &str) -> Result<&EntityDef, ConfigurationError> {
        self.by_name
            .get(name)
            .map(|&index| &self.entities[index])
            .ok_or_else(|| ConfigurationError::UnknownEntity(name.to_string()))
    }

    /// Looks up a relation declared on `entity`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` or `UnknownRelation`.
    pub fn relation(&self, entity: &str, relation: &str) -> Result<&Relation, ConfigurationError> {
        self.entity(entity)?
            .relation(relation)
            .ok_or_else(|| ConfigurationError::UnknownRelation {
                entity: entity.to_string(),
                relation: relation.to_string(),
            })
    }

    /// Returns a serializable description of every declaration.
    pub fn describe(&self) -> SchemaDescription<'_> {
        SchemaDescription {
            variant: self.variant,
            entities: &self.entities,
        }
    }

    /// Checks the declarations against the live schema behind `conn`.
    ///
    /// Each declared table must exist under exactly the declared name, and
    /// each declared column must exist on it with exactly the declared name.
    /// Extra physical columns are allowed.
    ///
    /// # Errors
    ///
    /// Returns `MissingTable`, `TableCaseMismatch`, `MissingColumn`, or
    /// `Database` if the schema cannot be read.
    pub fn validate_schema(&self, conn: &Connection) -> Result<(), ConfigurationError> {
        for entity in &self.entities {
            let actual = chinook_db::find_table(conn, entity.table)?.ok_or_else(|| {
                ConfigurationError::MissingTable {
                    entity: entity.name.to_string(),
                    table: entity.table.to_string(),
                }
            })?;

            if actual != entity.table {
                return Err(ConfigurationError::TableCaseMismatch {
                    entity: entity.name.to_string(),
                    declared: entity.table.to_string(),
                    actual,
                });
            }

            let physical = chinook_db::table_columns(conn, &actual)?;
            for column in entity.columns {
                if !physical.iter().any(|c| c == column) {
                    return Err(ConfigurationError::MissingColumn {
                        table: actual,
                        column: column.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            variant = self.variant.as_str(),
            entities = self.entities.len(),
            "registry matches backing schema"
        );

        Ok(())
    }

    fn check_entity(&self, entity: &EntityDef) -> Result<(), ConfigurationError> {
        if entity.primary_key.is_empty() {
            return Err(ConfigurationError::MissingPrimaryKey(entity.name.to_string()));
        }
        for column in entity.primary_key {
            require_column(entity, column)?;
        }

        for (index, relation) in entity.relations.iter().enumerate() {
            if entity.relations[..index]
                .iter()
                .any(|earlier| earlier.name == relation.name)
            {
                return Err(ConfigurationError::DuplicateRelation {
                    entity: entity.name.to_string(),
                    relation: relation.name.to_string(),
                });
            }

            let target = self.related(entity, relation, relation.target)?;
            match relation.kind {
                RelationKind::HasMany {
                    foreign_key,
                    owner_key,
                } => {
                    require_column(entity, owner_key)?;
                    require_column(target, foreign_key)?;
                }
                RelationKind::BelongsTo {
                    foreign_key,
                    target_key,
                } => {
                    require_column(entity, foreign_key)?;
                    require_column(target, target_key)?;
                }
                RelationKind::ManyToMany(spec) => {
                    let join = self.related(entity, relation, spec.join)?;
                    require_column(entity, spec.owner_key)?;
                    require_column(join, spec.left_key)?;
                    require_column(join, spec.right_key)?;
                    require_column(target, spec.target_key)?;
                }
            }
        }

        Ok(())
    }

    fn related(
        &self,
        entity: &EntityDef,
        relation: &Relation,
        name: &str,
    ) -> Result<&EntityDef, ConfigurationError> {
        self.entity(name).map_err(|_| ConfigurationError::UnknownTarget {
            entity: entity.name.to_string(),
            relation: relation.name.to_string(),
            target: name.to_string(),
        })
    }
}

fn require_column(entity: &EntityDef, column: &str) -> Result<(), ConfigurationError> {
    if entity.has_column(column) {
        Ok(())
    } else {
        Err(ConfigurationError::UnknownColumn {
            entity: entity.name.to_string(),
            column: column.to_string(),
        })
    }
}
