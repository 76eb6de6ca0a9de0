//! Trip aggregate and its owned entities.
//!
//! # Responsibility
//! - Define the persisted shape of a trip (itinerary, packing, expenses, notes).
//! - Provide in-memory edit helpers applied before a trip is resubmitted.
//!
//! # Invariants
//! - A trip exclusively owns its days, packing items and expenses.
//! - After normalization, `days` covers `start_date..=end_date` exactly.
//! - Serialized field names follow the portable camelCase JSON layout.

use crate::dates::{ensure_days, normalize_days};
use serde::{Deserialize, Serialize};

/// Title given to trips created without one.
pub const DEFAULT_TRIP_TITLE: &str = "New trip";
/// Title given to freshly added itinerary entries.
pub const DEFAULT_PLAN_TITLE: &str = "New plan";

/// One scheduled entry within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    pub id: String,
    /// `HH:MM` text, stored as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl PlanItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            time: None,
            title: title.into(),
            location: None,
            memo: None,
        }
    }
}

/// Itinerary for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub items: Vec<PlanItem>,
}

impl DayPlan {
    /// Creates a day with no items.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub packed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub label: String,
    pub amount: i64,
    #[serde(rename = "paidBy", default, skip_serializing_if = "Option::is_none")]
    pub paid_by: Option<String>,
}

/// Root aggregate for one planned journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`, inclusive.
    pub start_date: String,
    /// `YYYY-MM-DD`, inclusive.
    pub end_date: String,
    #[serde(default)]
    pub days: Vec<DayPlan>,
    #[serde(default)]
    pub packing: Vec<PackingItem>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub notes: String,
}

impl Trip {
    /// Creates a trip with empty collections and a normalized day list.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        ensure_days(Self {
            id: id.into(),
            title: title.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            days: Vec::new(),
            packing: Vec::new(),
            expenses: Vec::new(),
            notes: String::new(),
        })
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Moves the date range and re-normalizes the day list.
    ///
    /// Days falling outside the new range are dropped with their items.
    pub fn set_dates(&mut self, start_date: impl Into<String>, end_date: impl Into<String>) {
        self.start_date = start_date.into();
        self.end_date = end_date.into();
        self.days = normalize_days(
            std::mem::take(&mut self.days),
            &self.start_date,
            &self.end_date,
        );
    }

    /// Appends a plan entry with the default title to the day at `day_index`.
    ///
    /// Returns `None` when the day does not exist.
    pub fn add_plan_item(
        &mut self,
        day_index: usize,
        id: impl Into<String>,
    ) -> Option<&mut PlanItem> {
        let day = self.days.get_mut(day_index)?;
        day.items.push(PlanItem::new(id, DEFAULT_PLAN_TITLE));
        day.items.last_mut()
    }

    /// Applies `edit` to one plan entry. Returns whether the entry was found.
    pub fn update_plan_item(
        &mut self,
        day_index: usize,
        item_id: &str,
        edit: impl FnOnce(&mut PlanItem),
    ) -> bool {
        match self
            .days
            .get_mut(day_index)
            .and_then(|day| day.items.iter_mut().find(|item| item.id == item_id))
        {
            Some(item) => {
                edit(item);
                true
            }
            None => false,
        }
    }

    /// Removes one plan entry. Returns whether anything was removed.
    pub fn remove_plan_item(&mut self, day_index: usize, item_id: &str) -> bool {
        let Some(day) = self.days.get_mut(day_index) else {
            return false;
        };
        let before = day.items.len();
        day.items.retain(|item| item.id != item_id);
        day.items.len() != before
    }

    /// Appends an unpacked item with quantity 1.
    pub fn add_packing_item(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> &mut PackingItem {
        self.packing.push(PackingItem {
            id: id.into(),
            name: name.into(),
            quantity: 1,
            packed: false,
        });
        let last = self.packing.len() - 1;
        &mut self.packing[last]
    }

    pub fn update_packing_item(&mut self, id: &str, edit: impl FnOnce(&mut PackingItem)) -> bool {
        match self.packing.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                edit(item);
                true
            }
            None => false,
        }
    }

    pub fn remove_packing_item(&mut self, id: &str) -> bool {
        let before = self.packing.len();
        self.packing.retain(|item| item.id != id);
        self.packing.len() != before
    }

    /// Number of packing entries already checked off.
    pub fn packed_count(&self) -> usize {
        self.packing.iter().filter(|item| item.packed).count()
    }

    pub fn add_expense(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        amount: i64,
    ) -> &mut Expense {
        self.expenses.push(Expense {
            id: id.into(),
            label: label.into(),
            amount,
            paid_by: None,
        });
        let last = self.expenses.len() - 1;
        &mut self.expenses[last]
    }

    pub fn update_expense(&mut self, id: &str, edit: impl FnOnce(&mut Expense)) -> bool {
        match self.expenses.iter_mut().find(|expense| expense.id == id) {
            Some(expense) => {
                edit(expense);
                true
            }
            None => false,
        }
    }

    pub fn remove_expense(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);
        self.expenses.len() != before
    }

    /// Sum of all expense amounts, or `None` when it does not fit in `i64`.
    pub fn expense_total(&self) -> Option<i64> {
        self.expenses
            .iter()
            .try_fold(0i64, |total, expense| total.checked_add(expense.amount))
    }
}
