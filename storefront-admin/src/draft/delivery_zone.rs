//! Delivery zone form draft

use shared::models::{DeliveryZone, DeliveryZoneCreate, DeliveryZoneUpdate};

use super::{Draft, DraftError, require_amount, require_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryZoneDraft {
    pub id: Option<i64>,
    pub neighborhood_name: String,
    /// Fee as typed
    pub delivery_fee: String,
    pub is_active: bool,
}

impl Default for DeliveryZoneDraft {
    fn default() -> Self {
        Self {
            id: None,
            neighborhood_name: String::new(),
            delivery_fee: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryZoneAction {
    SetNeighborhood(String),
    SetDeliveryFee(String),
    SetActive(bool),
}

impl DeliveryZoneDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_zone(zone: &DeliveryZone) -> Self {
        Self {
            id: Some(zone.id),
            neighborhood_name: zone.neighborhood_name.clone(),
            delivery_fee: zone.delivery_fee.to_string(),
            is_active: zone.is_active,
        }
    }

    pub fn to_create(&self) -> Result<DeliveryZoneCreate, DraftError> {
        self.validate()?;
        Ok(DeliveryZoneCreate {
            neighborhood_name: self.neighborhood_name.trim().to_string(),
            delivery_fee: require_amount("deliveryFee", &self.delivery_fee)?,
            is_active: Some(self.is_active),
        })
    }

    pub fn to_update(&self) -> Result<DeliveryZoneUpdate, DraftError> {
        let create = self.to_create()?;
        Ok(DeliveryZoneUpdate {
            neighborhood_name: Some(create.neighborhood_name),
            delivery_fee: Some(create.delivery_fee),
            is_active: create.is_active,
        })
    }
}

impl Draft for DeliveryZoneDraft {
    type Action = DeliveryZoneAction;

    fn reduce(&self, action: DeliveryZoneAction) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match action {
            DeliveryZoneAction::SetNeighborhood(v) => next.neighborhood_name = v,
            DeliveryZoneAction::SetDeliveryFee(v) => next.delivery_fee = v,
            DeliveryZoneAction::SetActive(v) => next.is_active = v,
        }
        Ok(next)
    }

    fn validate(&self) -> Result<(), DraftError> {
        require_text("neighborhoodName", &self.neighborhood_name)?;
        require_amount("deliveryFee", &self.delivery_fee)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_zone_requires_name_and_fee() {
        let draft = DeliveryZoneDraft::new();
        assert_eq!(draft.validate(), Err(DraftError::MissingField("neighborhoodName")));
        let draft = draft
            .reduce(DeliveryZoneAction::SetNeighborhood("Centro".into()))
            .unwrap();
        assert_eq!(draft.validate(), Err(DraftError::MissingField("deliveryFee")));
    }

    #[test]
    fn test_negative_fee_rejected() {
        let draft = DeliveryZoneDraft::new()
            .reduce(DeliveryZoneAction::SetNeighborhood("Centro".into()))
            .unwrap()
            .reduce(DeliveryZoneAction::SetDeliveryFee("-2".into()))
            .unwrap();
        assert_eq!(draft.validate(), Err(DraftError::NegativeAmount("deliveryFee")));
    }

    #[test]
    fn test_free_delivery_allowed() {
        let create = DeliveryZoneDraft::new()
            .reduce(DeliveryZoneAction::SetNeighborhood(" Jardim América ".into()))
            .unwrap()
            .reduce(DeliveryZoneAction::SetDeliveryFee("0".into()))
            .unwrap()
            .to_create()
            .unwrap();
        assert_eq!(create.neighborhood_name, "Jardim América");
        assert_eq!(create.delivery_fee, Decimal::ZERO);
        assert_eq!(create.is_active, Some(true));
    }
}
