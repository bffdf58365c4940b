use atelier_core::{AppError, AppResult, Locale};
use serde_json::{Map, Value};

use crate::blueprint::{BlueprintInstance, temporary_instance_id};

/// Direction of a one-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards index 0.
    Up,
    /// Towards the end of the list.
    Down,
}

/// Ordered list of instances placed on one page.
///
/// Every instance's `order` equals its index, so orders are always
/// `0..N-1` with no gaps or duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageComposition {
    instances: Vec<BlueprintInstance>,
}

impl PageComposition {
    /// Creates an empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a composition from stored instances, sorted by their stored
    /// order and renumbered densely.
    #[must_use]
    pub fn from_instances(mut instances: Vec<BlueprintInstance>) -> Self {
        instances.sort_by_key(BlueprintInstance::order);
        let mut composition = Self { instances };
        composition.reindex();
        composition
    }

    /// Returns the instances in render order.
    #[must_use]
    pub fn instances(&self) -> &[BlueprintInstance] {
        &self.instances
    }

    /// Consumes the composition into its ordered instances.
    #[must_use]
    pub fn into_instances(self) -> Vec<BlueprintInstance> {
        self.instances
    }

    /// Returns the number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns whether the page holds no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Finds an instance by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BlueprintInstance> {
        self.instances.iter().find(|instance| instance.id() == id)
    }

    /// Returns the index of an instance.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.instances.iter().position(|instance| instance.id() == id)
    }

    /// Appends an instance at the end.
    pub fn push(&mut self, mut instance: BlueprintInstance) {
        instance.set_order(self.instances.len());
        self.instances.push(instance);
    }

    /// Removes an instance and closes the gap it leaves.
    pub fn remove(&mut self, id: &str) -> Option<BlueprintInstance> {
        let index = self.position(id)?;
        let removed = self.instances.remove(index);
        self.reindex();
        Some(removed)
    }

    /// Appends a copy of an instance under a fresh temporary id and returns
    /// the new id.
    pub fn duplicate(&mut self, id: &str) -> AppResult<String> {
        let source = self
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("instance '{id}' is not on this page")))?;
        let copy = source.duplicate_as(temporary_instance_id());
        let copy_id = copy.id().to_owned();
        self.push(copy);
        Ok(copy_id)
    }

    /// Swaps the instance at `index` with its neighbour. Moves past either
    /// end are ignored; returns whether anything moved.
    pub fn move_instance(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        };
        let Some(target) = target.filter(|target| *target < self.instances.len()) else {
            return false;
        };
        if index >= self.instances.len() {
            return false;
        }

        self.instances.swap(index, target);
        self.reindex();
        true
    }

    /// Replaces one locale's payload of an instance.
    pub fn update_data(
        &mut self,
        id: &str,
        locale: Locale,
        data: Map<String, Value>,
    ) -> AppResult<()> {
        let instance = self
            .instances
            .iter_mut()
            .find(|instance| instance.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("instance '{id}' is not on this page")))?;
        instance.set_data(locale, data);
        Ok(())
    }

    fn reindex(&mut self) {
        for (index, instance) in self.instances.iter_mut().enumerate() {
            instance.set_order(index);
        }
    }
}
