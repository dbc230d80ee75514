//! Back-office overview built from the three resource collections.

use serde::Serialize;

use super::{Activity, ActivityBooking, RoomBooking};

/// Headline numbers for the front desk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub activities: usize,
    pub activity_bookings: usize,
    pub room_bookings: usize,
    /// Sum of `montoTotal` over activity and room bookings.
    pub estimated_revenue: f64,
}

impl DashboardStats {
    pub fn from_collections(
        activities: &[Activity],
        activity_bookings: &[ActivityBooking],
        room_bookings: &[RoomBooking],
    ) -> Self {
        let activity_revenue: f64 = activity_bookings.iter().map(|b| b.total_amount).sum();
        let room_revenue: f64 = room_bookings.iter().map(|b| b.total_amount).sum();
        Self {
            activities: activities.len(),
            activity_bookings: activity_bookings.len(),
            room_bookings: room_bookings.len(),
            estimated_revenue: activity_revenue + room_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_booking(total: f64) -> RoomBooking {
        RoomBooking {
            id: 1,
            guest_id: 42,
            room_id: 101,
            check_in: "2026-03-01".to_string(),
            check_out: "2026-03-04".to_string(),
            guests: 2,
            children: 0,
            total_amount: total,
            amount_paid: 0.0,
            status: "Confirmada".to_string(),
            checked_in_at: None,
            checked_out_at: None,
            created_by: None,
            notes: None,
        }
    }

    fn activity_booking(total: f64) -> ActivityBooking {
        ActivityBooking {
            id: 1,
            activity_id: 7,
            guest_id: 42,
            date: "2026-03-02".to_string(),
            time: "10:00:00".to_string(),
            party_size: 2,
            status: "Pendiente".to_string(),
            total_amount: total,
            special_notes: None,
            reminder_sent: false,
            reminder_date: None,
        }
    }

    #[test]
    fn revenue_adds_both_booking_kinds() {
        let stats = DashboardStats::from_collections(
            &[],
            &[activity_booking(51.0), activity_booking(24.5)],
            &[room_booking(450.0)],
        );
        assert_eq!(stats.activities, 0);
        assert_eq!(stats.activity_bookings, 2);
        assert_eq!(stats.room_bookings, 1);
        assert_eq!(stats.estimated_revenue, 525.5);
    }

    #[test]
    fn empty_collections_give_zeroes() {
        assert_eq!(
            DashboardStats::from_collections(&[], &[], &[]),
            DashboardStats::default()
        );
    }
}
