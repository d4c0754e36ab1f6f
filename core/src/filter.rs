// modoya/src/filter.rs

use crate::catalog::Item;
use serde::Deserialize;

/// Optional equality criteria. `None` or blank values match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterCriteria {
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub style: Option<String>,
  #[serde(default)]
  pub color: Option<String>,
  #[serde(default)]
  pub season: Option<String>,
}

impl FilterCriteria {
  pub fn by_style(style: impl Into<String>) -> Self {
    Self {
      style: Some(style.into()),
      ..Default::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    [&self.category, &self.style, &self.color, &self.season]
      .iter()
      .all(|c| active(c).is_none())
  }

  /// All active criteria must hold. An absent item field compares as "".
  pub fn matches(&self, item: &Item) -> bool {
    field_matches(&self.category, item.category())
      && field_matches(&self.style, item.style())
      && field_matches(&self.color, item.color())
      && field_matches(&self.season, item.season())
  }
}

fn active(criterion: &Option<String>) -> Option<&str> {
  criterion.as_deref().filter(|c| !c.trim().is_empty())
}

fn field_matches(criterion: &Option<String>, value: Option<&str>) -> bool {
  match active(criterion) {
    None => true,
    Some(wanted) => value.unwrap_or("").to_lowercase() == wanted.to_lowercase(),
  }
}

/// Items matching `criteria`, in catalog order.
pub fn filter_items<'a>(items: &'a [Item], criteria: &FilterCriteria) -> Vec<&'a Item> {
  items.iter().filter(|item| criteria.matches(item)).collect()
}
