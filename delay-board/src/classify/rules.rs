//! Line membership heuristics.
//!
//! The feed has no line identifier, so membership of the Budapest–Győr–
//! Hegyeshalom line is decided from route names, headsigns, and the next
//! stop. Rules are tried in order and the first match wins.

use super::extract::Candidate;

/// Zonal suburban route codes that only run on the line.
pub const ZONAL_ROUTES: &[&str] = &["S10", "G10", "S12"];

/// Lowercase fragments of route names and headsigns used by long-distance
/// and regional services along the line.
pub const ROUTE_KEYWORDS: &[&str] = &[
    "győr",
    "tatabánya",
    "hegyeshalom",
    "oroszlány",
    "wien",
    "komárom",
    "csárdás",
    "kálmán imre",
    "railjet",
    "rjx",
    "dráva",
    "mura",
    "savaria",
    "advent",
    "lehár",
    "liszt ferenc",
    "semmelweis",
    "dacia",
];

/// Stations served by no other line.
pub const EXCLUSIVE_STATIONS: &[&str] = &[
    "Budaörs",
    "Törökbálint",
    "Biatorbágy",
    "Herceghalom",
    "Bicske alsó",
    "Bicske",
    "Szár",
    "Szárliget",
    "Alsógalla",
    "Tatabánya",
    "Vértesszőlős",
    "Tóvároskert",
    "Tata",
    "Almásfüzitő",
    "Almásfüzitő felső",
    "Komárom",
    "Ács",
    "Nagyszentjános",
    "Győrszentiván",
    "Abda",
    "Öttevény",
    "Lébény-Mosonszentmiklós",
    "Moson",
    "Mosonmagyaróvár",
    "Levél",
    "Hegyeshalom",
    "Bánhida",
    "Oroszlány",
];

/// Which rule classified a vehicle as on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipRule {
    ZonalRoute,
    Keyword,
    ExclusiveStation,
}

type Predicate = fn(&Candidate<'_>) -> bool;

/// Membership rules in evaluation order.
const RULES: [(MembershipRule, Predicate); 3] = [
    (MembershipRule::ZonalRoute, is_zonal_route),
    (MembershipRule::Keyword, matches_keyword),
    (MembershipRule::ExclusiveStation, stops_at_exclusive_station),
];

/// Exact, case-sensitive match of the route long name against a zonal code.
fn is_zonal_route(c: &Candidate<'_>) -> bool {
    c.long_name.is_some_and(|name| ZONAL_ROUTES.contains(&name))
}

/// Case-insensitive keyword search in the route long name or headsign.
fn matches_keyword(c: &Candidate<'_>) -> bool {
    let long_name = c.long_name.unwrap_or_default().to_lowercase();
    let headsign = c.headsign.unwrap_or_default().to_lowercase();

    ROUTE_KEYWORDS
        .iter()
        .any(|kw| long_name.contains(kw) || headsign.contains(kw))
}

fn stops_at_exclusive_station(c: &Candidate<'_>) -> bool {
    EXCLUSIVE_STATIONS.contains(&c.next_stop_name)
}

/// Decide whether a vehicle runs on the line.
///
/// Returns the first rule that matched, or `None` if the vehicle is not
/// on the line.
pub fn line_membership(candidate: &Candidate<'_>) -> Option<MembershipRule> {
    RULES
        .iter()
        .find(|(_, matches)| matches(candidate))
        .map(|(rule, _)| *rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::extract::NOT_AVAILABLE;

    fn candidate<'a>(
        long_name: Option<&'a str>,
        headsign: Option<&'a str>,
        next_stop_name: &'a str,
    ) -> Candidate<'a> {
        Candidate {
            route_type: 109,
            long_name,
            short_name: None,
            headsign,
            next_stop_name,
            delay_secs: 60,
            speed: None,
        }
    }

    #[test]
    fn zonal_route_is_exact_and_case_sensitive() {
        let c = candidate(Some("G10"), None, NOT_AVAILABLE);
        assert_eq!(line_membership(&c), Some(MembershipRule::ZonalRoute));

        let c = candidate(Some("g10"), None, NOT_AVAILABLE);
        assert_eq!(line_membership(&c), None);

        let c = candidate(Some("S10 "), None, NOT_AVAILABLE);
        assert_eq!(line_membership(&c), None);
    }

    #[test]
    fn keyword_matches_long_name_ignoring_case() {
        let c = candidate(Some("RAILJET xpress"), None, NOT_AVAILABLE);
        assert_eq!(line_membership(&c), Some(MembershipRule::Keyword));

        let c = candidate(Some("Budapest–GYŐR"), None, NOT_AVAILABLE);
        assert_eq!(line_membership(&c), Some(MembershipRule::Keyword));
    }

    #[test]
    fn keyword_matches_headsign() {
        let c = candidate(Some("IC 932"), Some("Hegyeshalom"), NOT_AVAILABLE);
        assert_eq!(line_membership(&c), Some(MembershipRule::Keyword));
    }

    #[test]
    fn exclusive_station_is_last_resort() {
        let c = candidate(Some("Személyvonat"), Some("Budapest-Déli"), "Biatorbágy");
        assert_eq!(line_membership(&c), Some(MembershipRule::ExclusiveStation));

        let c = candidate(Some("Személyvonat"), Some("Budapest-Déli"), "biatorbágy");
        assert_eq!(line_membership(&c), None);
    }

    #[test]
    fn zonal_route_wins_over_later_rules() {
        let c = candidate(Some("S12"), Some("Tatabánya"), "Tata");
        assert_eq!(line_membership(&c), Some(MembershipRule::ZonalRoute));
    }

    #[test]
    fn unrelated_vehicle_is_not_member() {
        let c = candidate(Some("Szeged–Budapest"), Some("Szeged"), "Kecskemét");
        assert_eq!(line_membership(&c), None);

        let c = candidate(None, None, NOT_AVAILABLE);
        assert_eq!(line_membership(&c), None);
    }
}
