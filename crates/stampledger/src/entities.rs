//! Entity registry: organizations and their role-based membership.

use stampledger_core::{new_record_id, validate_entity_name, EntityAccount, EntityType, Role};
use stampledger_store::{KvStore, WriteBatch};
use tracing::info;

use crate::error::{LedgerError, Result};
use crate::events::{AuditEvent, EventKind};
use crate::ledger::Ledger;
use crate::lookup::resolve_group;
use crate::schema::{self, ENTITIES, ENTITIES_BY_OWNER};

impl<S: KvStore> Ledger<S> {
    // ─────────────────────────────────────────────────────────────────────────
    // Entity Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an entity owned by `creator`.
    ///
    /// `entity_type` is the wire name: `company`, `municipality`, or `firm`.
    pub async fn create_entity(&self, creator: &str, name: &str, entity_type: &str) -> Result<String> {
        let entity_type: EntityType = entity_type.parse()?;
        validate_entity_name(name)?;

        let entity = EntityAccount::new(
            new_record_id(),
            name.to_string(),
            entity_type,
            creator,
            self.now(),
        );

        let mut batch = WriteBatch::new();
        schema::stage_entity(&mut batch, &entity)?;
        self.commit(batch).await?;

        info!(entity_id = %entity.id, owner = creator, "entity created");
        self.emit(
            AuditEvent::new(EventKind::EntityCreated)
                .with("entity_id", entity.id.as_str())
                .with("name", name)
                .with("type", entity_type.as_str())
                .with("owner", creator),
        );

        Ok(entity.id)
    }

    /// Add a member to an entity, or change an existing member's role.
    ///
    /// Only admins may call this. The owner always stays an admin.
    pub async fn add_entity_member(
        &self,
        creator: &str,
        entity_id: &str,
        member: &str,
        role: &str,
    ) -> Result<()> {
        let role: Role = role.parse()?;

        let _guard = self.locks().lock(ENTITIES.key(entity_id)).await;

        let mut entity = self.get_entity(entity_id).await?;
        if !entity.is_admin(creator) {
            return Err(LedgerError::Unauthorized(
                "only admins can add members".to_string(),
            ));
        }
        if entity.is_owner(member) && !role.is_admin() {
            return Err(LedgerError::Unauthorized(
                "the entity owner must remain an admin".to_string(),
            ));
        }

        entity.set_member(member, role);

        let mut batch = WriteBatch::new();
        ENTITIES.put_into(&mut batch, entity_id, &entity)?;
        self.commit(batch).await?;

        info!(entity_id, member, role = role.as_str(), "entity member added");
        self.emit(
            AuditEvent::new(EventKind::EntityMemberAdded)
                .with("entity_id", entity_id)
                .with("member_address", member)
                .with("role", role.as_str())
                .with("added_by", creator),
        );

        Ok(())
    }

    /// Remove a member from an entity. The owner cannot be removed.
    pub async fn remove_entity_member(&self, creator: &str, entity_id: &str, member: &str) -> Result<()> {
        let _guard = self.locks().lock(ENTITIES.key(entity_id)).await;

        let mut entity = self.get_entity(entity_id).await?;
        if !entity.is_admin(creator) {
            return Err(LedgerError::Unauthorized(
                "only admins can remove members".to_string(),
            ));
        }
        if entity.is_owner(member) {
            return Err(LedgerError::Unauthorized(
                "cannot remove the entity owner".to_string(),
            ));
        }
        if !entity.remove_member(member) {
            return Err(LedgerError::MemberNotFound {
                entity_id: entity_id.to_string(),
                member: member.to_string(),
            });
        }

        let mut batch = WriteBatch::new();
        ENTITIES.put_into(&mut batch, entity_id, &entity)?;
        self.commit(batch).await?;

        info!(entity_id, member, "entity member removed");
        self.emit(
            AuditEvent::new(EventKind::EntityMemberRemoved)
                .with("entity_id", entity_id)
                .with("member_address", member)
                .with("removed_by", creator),
        );

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entity Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn get_entity(&self, entity_id: &str) -> Result<EntityAccount> {
        ENTITIES
            .get(self.store(), entity_id)
            .await?
            .ok_or_else(|| LedgerError::EntityNotFound(entity_id.to_string()))
    }

    /// Entities owned by `owner`, in entity id order.
    pub async fn get_entities_by_owner(&self, owner: &str) -> Result<Vec<EntityAccount>> {
        resolve_group(self.store(), ENTITIES_BY_OWNER, &ENTITIES, owner).await
    }
}
