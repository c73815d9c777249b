use super::{Diagnostics, Rule, RuleCode};
use crate::domain::{Navigation, Site};
use std::collections::HashSet;

/// Country names are unique within a site.
pub struct UniqueCountryNames;

impl Rule<Site> for UniqueCountryNames {
    fn code(&self) -> RuleCode {
        RuleCode(1)
    }

    fn name(&self) -> &'static str {
        "unique-country-names"
    }

    fn check(&self, site: &Site, out: &mut Diagnostics) {
        let mut seen = HashSet::new();
        for country in &site.countries {
            if !seen.insert(country.name.as_str()) {
                out.report(
                    self.code(),
                    country.pos,
                    format!(
                        "Duplicate country name '{}' at {}. Country names must be unique.",
                        country.name, country.pos
                    ),
                );
            }
        }
    }
}

/// Every navigation entry names a declared country.
pub struct NavigationTargetsExist;

impl Rule<Site> for NavigationTargetsExist {
    fn code(&self) -> RuleCode {
        RuleCode(4)
    }

    fn name(&self) -> &'static str {
        "navigation-targets-exist"
    }

    fn check(&self, site: &Site, out: &mut Diagnostics) {
        let declared: HashSet<&str> = site.country_names().collect();
        for item in &site.navigation.items {
            if !declared.contains(item.name.as_str()) {
                out.report(
                    self.code(),
                    item.pos,
                    format!(
                        "Navigation item '{}' at {} does not match any declared country.",
                        item.name, item.pos
                    ),
                );
            }
        }
    }
}

/// Every declared country appears in the navigation. Together with
/// [`NavigationTargetsExist`] this makes navigation and countries 1:1.
pub struct CountriesListedInNavigation;

impl Rule<Site> for CountriesListedInNavigation {
    fn code(&self) -> RuleCode {
        RuleCode(12)
    }

    fn name(&self) -> &'static str {
        "countries-listed-in-navigation"
    }

    fn check(&self, site: &Site, out: &mut Diagnostics) {
        let listed: HashSet<&str> = site.navigation.items.iter().map(|i| i.name.as_str()).collect();
        for country in &site.countries {
            if !listed.contains(country.name.as_str()) {
                out.report(
                    self.code(),
                    country.pos,
                    format!(
                        "Country '{}' at {} is not listed in the navigation block.",
                        country.name, country.pos
                    ),
                );
            }
        }
    }
}

pub struct NoDuplicateNavigationItems;

impl Rule<Navigation> for NoDuplicateNavigationItems {
    fn code(&self) -> RuleCode {
        RuleCode(10)
    }

    fn name(&self) -> &'static str {
        "no-duplicate-navigation-items"
    }

    fn check(&self, navigation: &Navigation, out: &mut Diagnostics) {
        let mut seen = HashSet::new();
        for item in &navigation.items {
            if !seen.insert(item.name.as_str()) {
                out.report(
                    self.code(),
                    item.pos,
                    format!(
                        "Duplicate navigation item '{}' at {}. Each country should appear at most once in navigation.",
                        item.name, item.pos
                    ),
                );
            }
        }
    }
}

pub struct NavigationNotEmpty;

impl Rule<Navigation> for NavigationNotEmpty {
    fn code(&self) -> RuleCode {
        RuleCode(18)
    }

    fn name(&self) -> &'static str {
        "navigation-not-empty"
    }

    fn check(&self, navigation: &Navigation, out: &mut Diagnostics) {
        if navigation.items.is_empty() {
            out.report(
                self.code(),
                navigation.pos,
                format!(
                    "Navigation block at {} is empty. At least one country must be listed.",
                    navigation.pos
                ),
            );
        }
    }
}
