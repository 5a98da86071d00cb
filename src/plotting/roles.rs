//! Semantic column roles and the header fragments that identify them.
//!
//! Matching is case-insensitive. `contains` fragments are searched in the raw
//! header; `exact` names are compared with the unit-free header
//! (`I/mA` → `i`), which keeps one-letter names from matching everywhere.
//! A header containing any `excludes` fragment never takes the role.

use std::fmt;

use crate::data::units::clean_column_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Potential,
    Current,
    Time,
    RealImpedance,
    ImaginaryImpedance,
    Frequency,
    ImpedanceMagnitude,
    Phase,
    CycleNumber,
    Capacity,
}

#[derive(Debug, Clone, Copy)]
pub struct RoleMatcher {
    pub contains: &'static [&'static str],
    pub exact: &'static [&'static str],
    pub excludes: &'static [&'static str],
}

impl RoleMatcher {
    pub fn matches(&self, header: &str) -> bool {
        let lower = header.to_lowercase();
        if self.excludes.iter().any(|x| lower.contains(x)) {
            return false;
        }
        if self.contains.iter().any(|f| lower.contains(f)) {
            return true;
        }
        let clean = clean_column_name(&lower);
        self.exact.iter().any(|e| clean == *e)
    }
}

impl ColumnRole {
    pub fn matcher(self) -> RoleMatcher {
        match self {
            ColumnRole::Potential => RoleMatcher {
                contains: &["ewe", "potential", "voltage"],
                exact: &["e", "v", "vf", "u"],
                excludes: &[],
            },
            ColumnRole::Current => RoleMatcher {
                contains: &["current"],
                exact: &["i", "<i>", "im", "j"],
                excludes: &["time", "(z)"],
            },
            ColumnRole::Time => RoleMatcher {
                contains: &["time"],
                exact: &["t"],
                excludes: &[],
            },
            ColumnRole::RealImpedance => RoleMatcher {
                contains: &["re(z)", "z'", "zreal"],
                exact: &[],
                excludes: &["z''", "im(z)"],
            },
            ColumnRole::ImaginaryImpedance => RoleMatcher {
                contains: &["im(z)", "z''", "zimag"],
                exact: &[],
                excludes: &[],
            },
            ColumnRole::Frequency => RoleMatcher {
                contains: &["freq"],
                exact: &["f"],
                excludes: &[],
            },
            ColumnRole::ImpedanceMagnitude => RoleMatcher {
                contains: &["|z|", "magnitude", "modulus", "zmod"],
                exact: &[],
                excludes: &[],
            },
            ColumnRole::Phase => RoleMatcher {
                contains: &["phase", "phi", "zphz"],
                exact: &[],
                excludes: &[],
            },
            ColumnRole::CycleNumber => RoleMatcher {
                contains: &["cycle"],
                exact: &[],
                excludes: &[],
            },
            ColumnRole::Capacity => RoleMatcher {
                contains: &["capacity", "cap"],
                exact: &[],
                excludes: &[],
            },
        }
    }

    /// Index of the first column (in file order) that plays this role.
    pub fn find(self, columns: &[String]) -> Option<usize> {
        let matcher = self.matcher();
        columns.iter().position(|c| matcher.matches(c))
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::Potential => "potential",
            ColumnRole::Current => "current",
            ColumnRole::Time => "time",
            ColumnRole::RealImpedance => "Re(Z)",
            ColumnRole::ImaginaryImpedance => "Im(Z)",
            ColumnRole::Frequency => "frequency",
            ColumnRole::ImpedanceMagnitude => "|Z|",
            ColumnRole::Phase => "phase",
            ColumnRole::CycleNumber => "cycle number",
            ColumnRole::Capacity => "capacity",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn current_skips_time_and_potential_headers() {
        let c = cols(&["time/s", "Potential (V)", "I/mA"]);
        assert_eq!(ColumnRole::Current.find(&c), Some(2));
        assert_eq!(ColumnRole::Potential.find(&c), Some(1));
    }

    #[test]
    fn gamry_names_map_to_roles() {
        let c = cols(&["Pt", "T", "Vf", "Im", "Vu"]);
        assert_eq!(ColumnRole::Potential.find(&c), Some(2));
        assert_eq!(ColumnRole::Current.find(&c), Some(3));
        let z = cols(&["Pt", "Time", "Freq", "Zreal", "Zimag", "Zmod", "Zphz"]);
        assert_eq!(ColumnRole::Frequency.find(&z), Some(2));
        assert_eq!(ColumnRole::RealImpedance.find(&z), Some(3));
        assert_eq!(ColumnRole::ImaginaryImpedance.find(&z), Some(4));
        assert_eq!(ColumnRole::ImpedanceMagnitude.find(&z), Some(5));
        assert_eq!(ColumnRole::Phase.find(&z), Some(6));
    }

    #[test]
    fn real_part_does_not_take_double_prime() {
        let c = cols(&["Z'' (Ohm)", "Z' (Ohm)"]);
        assert_eq!(ColumnRole::RealImpedance.find(&c), Some(1));
        assert_eq!(ColumnRole::ImaginaryImpedance.find(&c), Some(0));
    }

    #[test]
    fn impedance_parts_are_not_currents() {
        let c = cols(&["freq/Hz", "Re(Z)/Ohm", "Im(Z)/Ohm"]);
        assert_eq!(ColumnRole::Current.find(&c), None);
    }
}
