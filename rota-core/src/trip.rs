use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled journey with a fixed seat capacity.
///
/// Deleting a trip never cascades to its passengers; that cleanup is an
/// operator decision made outside this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    /// Non-negative. Seats are numbered 1..=seat_capacity.
    pub seat_capacity: i32,
    /// Default price charged per passenger; each passenger carries its own
    /// negotiated price as well.
    pub price: f64,
    #[serde(default)]
    pub expenses: TripExpenses,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(
        destination: String,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        seat_capacity: i32,
        price: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            destination,
            departure_date,
            return_date,
            seat_capacity: seat_capacity.max(0),
            price,
            expenses: TripExpenses::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Trip-level expense/revenue categories tracked by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Fees,
    Transport,
    Drivers,
    Transfers,
    Lodging,
    Excursions,
    Gifts,
    Raffles,
    Miscellaneous,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Fees,
        ExpenseCategory::Transport,
        ExpenseCategory::Drivers,
        ExpenseCategory::Transfers,
        ExpenseCategory::Lodging,
        ExpenseCategory::Excursions,
        ExpenseCategory::Gifts,
        ExpenseCategory::Raffles,
        ExpenseCategory::Miscellaneous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Fees => "Taxas",
            ExpenseCategory::Transport => "Transporte",
            ExpenseCategory::Drivers => "Motoristas",
            ExpenseCategory::Transfers => "Traslados",
            ExpenseCategory::Lodging => "Hospedagem",
            ExpenseCategory::Excursions => "Passeios",
            ExpenseCategory::Gifts => "Brindes",
            ExpenseCategory::Raffles => "Sorteios",
            ExpenseCategory::Miscellaneous => "Diversos",
        }
    }
}

/// One expense category's paired fields: the committed total and the advance
/// already paid to the supplier. Both are optional form fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub expense_total: Option<f64>,
    pub advance_paid: Option<f64>,
}

/// The full expense form for a trip, one line per category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripExpenses {
    pub fees: ExpenseLine,
    pub transport: ExpenseLine,
    pub drivers: ExpenseLine,
    pub transfers: ExpenseLine,
    pub lodging: ExpenseLine,
    pub excursions: ExpenseLine,
    pub gifts: ExpenseLine,
    pub raffles: ExpenseLine,
    pub miscellaneous: ExpenseLine,
}

impl TripExpenses {
    pub fn line(&self, category: ExpenseCategory) -> &ExpenseLine {
        match category {
            ExpenseCategory::Fees => &self.fees,
            ExpenseCategory::Transport => &self.transport,
            ExpenseCategory::Drivers => &self.drivers,
            ExpenseCategory::Transfers => &self.transfers,
            ExpenseCategory::Lodging => &self.lodging,
            ExpenseCategory::Excursions => &self.excursions,
            ExpenseCategory::Gifts => &self.gifts,
            ExpenseCategory::Raffles => &self.raffles,
            ExpenseCategory::Miscellaneous => &self.miscellaneous,
        }
    }

    pub fn line_mut(&mut self, category: ExpenseCategory) -> &mut ExpenseLine {
        match category {
            ExpenseCategory::Fees => &mut self.fees,
            ExpenseCategory::Transport => &mut self.transport,
            ExpenseCategory::Drivers => &mut self.drivers,
            ExpenseCategory::Transfers => &mut self.transfers,
            ExpenseCategory::Lodging => &mut self.lodging,
            ExpenseCategory::Excursions => &mut self.excursions,
            ExpenseCategory::Gifts => &mut self.gifts,
            ExpenseCategory::Raffles => &mut self.raffles,
            ExpenseCategory::Miscellaneous => &mut self.miscellaneous,
        }
    }

    /// All lines in category order.
    pub fn lines(&self) -> impl Iterator<Item = (ExpenseCategory, &ExpenseLine)> {
        ExpenseCategory::ALL.iter().map(|c| (*c, self.line(*c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_never_negative() {
        let trip = Trip::new(
            "Gramado".to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            -5,
            1500.0,
        );
        assert_eq!(trip.seat_capacity, 0);
    }

    #[test]
    fn test_expense_lines_cover_all_categories() {
        let mut expenses = TripExpenses::default();
        expenses.line_mut(ExpenseCategory::Lodging).expense_total = Some(800.0);
        assert_eq!(expenses.lines().count(), 9);
        assert_eq!(
            expenses.line(ExpenseCategory::Lodging).expense_total,
            Some(800.0)
        );
    }
}
