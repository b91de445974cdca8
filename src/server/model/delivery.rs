//! Delivery tracking model and its status machine.

use chrono::{DateTime, Utc};

use crate::model::delivery::{
    AddDeliveryEventDto, CreateDeliveryDto, DeliveryDto, DeliveryEventDto, DeliveryQuery,
    DeliveryStatus,
};
use crate::server::{error::AppError, util::parse::parse_enum};

impl DeliveryStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Returned)
    }

    /// Whether a shipment may move from `self` to `next`.
    ///
    /// The happy path is `pending -> picked_up -> in_transit -> out_for_delivery ->
    /// delivered`. `failed` is reachable from any non-terminal state other than itself
    /// and can resume to `in_transit`. `returned` is reachable from `failed`,
    /// `in_transit` and `out_for_delivery`.
    pub fn can_transition_to(self, next: DeliveryStatus) -> bool {
        use DeliveryStatus::*;

        if self.is_terminal() {
            return false;
        }

        match next {
            Failed => self != Failed,
            Returned => matches!(self, Failed | InTransit | OutForDelivery),
            _ => matches!(
                (self, next),
                (Pending, PickedUp)
                    | (PickedUp, InTransit)
                    | (InTransit, OutForDelivery)
                    | (OutForDelivery, Delivered)
                    | (Failed, InTransit)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryEvent {
    pub id: i32,
    pub delivery_id: i32,
    pub status: DeliveryStatus,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DeliveryEvent {
    pub fn from_entity(entity: entity::delivery_event::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            delivery_id: entity.delivery_id,
            status: parse_enum(&entity.status)?,
            location: entity.location,
            description: entity.description,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> DeliveryEventDto {
        DeliveryEventDto {
            id: self.id,
            status: self.status,
            location: self.location,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub id: i32,
    pub order_id: i32,
    pub carrier: String,
    pub tracking_code: String,
    pub status: DeliveryStatus,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    /// Oldest first.
    pub events: Vec<DeliveryEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn from_entity(
        entity: entity::delivery::Model,
        events: Vec<entity::delivery_event::Model>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            order_id: entity.order_id,
            carrier: entity.carrier,
            tracking_code: entity.tracking_code,
            status: parse_enum(&entity.status)?,
            estimated_delivery: entity.estimated_delivery,
            delivered_at: entity.delivered_at,
            events: events
                .into_iter()
                .map(DeliveryEvent::from_entity)
                .collect::<Result<_, _>>()?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> DeliveryDto {
        DeliveryDto {
            id: self.id,
            order_id: self.order_id,
            carrier: self.carrier,
            tracking_code: self.tracking_code,
            status: self.status,
            estimated_delivery: self.estimated_delivery,
            delivered_at: self.delivered_at,
            events: self.events.into_iter().map(DeliveryEvent::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateDeliveryParam {
    pub order_id: i32,
    pub carrier: String,
    pub tracking_code: String,
    pub estimated_delivery: Option<DateTime<Utc>>,
}

impl CreateDeliveryParam {
    pub fn from_dto(order_id: i32, dto: CreateDeliveryDto) -> Self {
        Self {
            order_id,
            carrier: dto.carrier.trim().to_string(),
            tracking_code: dto.tracking_code.trim().to_string(),
            estimated_delivery: dto.estimated_delivery,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddDeliveryEventParam {
    pub status: DeliveryStatus,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl AddDeliveryEventParam {
    pub fn from_dto(dto: AddDeliveryEventDto) -> Self {
        Self {
            status: dto.status,
            location: dto.location,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryFilter {
    pub status: Option<DeliveryStatus>,
    pub carrier: Option<String>,
}

impl DeliveryFilter {
    pub fn from_query(query: &DeliveryQuery) -> Self {
        Self {
            status: query.status,
            carrier: query
                .carrier
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use DeliveryStatus::*;

    #[test]
    fn follows_happy_path() {
        assert!(Pending.can_transition_to(PickedUp));
        assert!(PickedUp.can_transition_to(InTransit));
        assert!(InTransit.can_transition_to(OutForDelivery));
        assert!(OutForDelivery.can_transition_to(Delivered));
    }

    #[test]
    fn cannot_skip_steps() {
        assert!(!Pending.can_transition_to(InTransit));
        assert!(!PickedUp.can_transition_to(Delivered));
    }

    #[test]
    fn failure_from_any_open_state() {
        for from in [Pending, PickedUp, InTransit, OutForDelivery] {
            assert!(from.can_transition_to(Failed), "{} -> failed", from);
        }
        assert!(!Failed.can_transition_to(Failed));
    }

    #[test]
    fn failed_can_resume_or_return() {
        assert!(Failed.can_transition_to(InTransit));
        assert!(Failed.can_transition_to(Returned));
        assert!(!Failed.can_transition_to(Delivered));
    }

    #[test]
    fn return_sources() {
        assert!(InTransit.can_transition_to(Returned));
        assert!(OutForDelivery.can_transition_to(Returned));
        assert!(!Pending.can_transition_to(Returned));
        assert!(!PickedUp.can_transition_to(Returned));
    }

    #[test]
    fn terminal_states_are_final() {
        for to in DeliveryStatus::ALL {
            assert!(!Delivered.can_transition_to(*to));
            assert!(!Returned.can_transition_to(*to));
        }
    }
}
