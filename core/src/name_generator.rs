//! Synthetic text from curated word lists.
//!
//! Covers everything the generators need to look plausible: personal
//! names, emails, street addresses, company names and coin names.

use crate::rng::GenRng;

/// Curated-list text generator.
pub struct NameGenerator;

impl NameGenerator {
    pub fn first_name(rng: &mut GenRng) -> &'static str {
        *rng.choose(FIRST_NAMES)
    }

    pub fn last_name(rng: &mut GenRng) -> &'static str {
        *rng.choose(LAST_NAMES)
    }

    /// `first.last42@domain`, lowercase. Independent of any profile row.
    pub fn email(rng: &mut GenRng) -> String {
        let first = Self::first_name(rng).to_lowercase();
        let last = Self::last_name(rng).to_lowercase();
        let suffix = rng.int_between(1, 99);
        let domain = rng.choose(EMAIL_DOMAINS);
        match rng.next_u64_below(3) {
            0 => format!("{first}.{last}@{domain}"),
            1 => format!("{first}{last}{suffix}@{domain}"),
            _ => format!("{}{last}{suffix}@{domain}", &first[..1]),
        }
    }

    /// One-line postal address: "1420 Maple Ave, Springfield, IL 62704".
    pub fn address(rng: &mut GenRng) -> String {
        let number = rng.int_between(1, 9999);
        let street = rng.choose(STREET_NAMES);
        let suffix = rng.choose(STREET_SUFFIXES);
        let (city, state) = *rng.choose(CITIES);
        let zip = rng.int_between(501, 99950);
        if rng.chance(0.15) {
            let unit = rng.int_between(1, 999);
            format!("{number} {street} {suffix} Apt. {unit}, {city}, {state} {zip:05}")
        } else {
            format!("{number} {street} {suffix}, {city}, {state} {zip:05}")
        }
    }

    /// Company name, e.g. "Harris Logistics Inc" or "Summit Analytics Group".
    pub fn company_name(rng: &mut GenRng) -> String {
        let industry = rng.choose(INDUSTRIES);
        let suffix = rng.choose(COMPANY_SUFFIXES);
        if rng.chance(0.5) {
            format!("{} {industry} {suffix}", rng.choose(COMPANY_PREFIXES))
        } else {
            format!("{} {industry} {suffix}", Self::last_name(rng))
        }
    }

    /// A single capitalized word.
    pub fn word(rng: &mut GenRng) -> &'static str {
        *rng.choose(WORDS)
    }
}

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "Michael", "Jennifer", "William", "Linda",
    "David", "Elizabeth", "Richard", "Barbara", "Joseph", "Susan", "Thomas", "Jessica",
    "Charles", "Sarah", "Daniel", "Karen", "Matthew", "Nancy", "Anthony", "Lisa",
    "Mark", "Betty", "Steven", "Sandra", "Andrew", "Ashley", "Joshua", "Emily",
    "Kevin", "Michelle", "Brian", "Amanda", "Ryan", "Melissa", "Jacob", "Rebecca",
    "Nicholas", "Laura", "Eric", "Amy", "Jonathan", "Angela", "Samuel", "Anna",
    "Gabriel", "Olivia", "Ethan", "Sophia", "Noah", "Isabella", "Logan", "Mia",
    "Mateo", "Aisha", "Hiroshi", "Priya", "Wei", "Fatima", "Diego", "Ingrid",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
    "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
    "White", "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker",
    "Young", "Allen", "King", "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores",
    "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell", "Mitchell",
    "Carter", "Roberts", "Patel", "Kim", "Chen", "Singh", "Okafor", "Kowalski",
    "Schmidt", "Rossi", "Tanaka", "Haddad", "Novak", "Larsen", "Silva", "Murphy",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.org", "example.net", "gmail.com", "yahoo.com",
    "hotmail.com", "outlook.com", "icloud.com",
];

const STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill", "Park",
    "Sunset", "River", "Main", "Church", "Highland", "Meadow", "Forest", "Willow",
    "Jefferson", "Lincoln", "Franklin", "Spring", "Ridge", "Valley", "Mill",
];

const STREET_SUFFIXES: &[&str] = &[
    "St", "Ave", "Blvd", "Rd", "Ln", "Dr", "Ct", "Way", "Pl", "Ter",
];

const CITIES: &[(&str, &str)] = &[
    ("New York", "NY"), ("Los Angeles", "CA"), ("Chicago", "IL"), ("Houston", "TX"),
    ("Phoenix", "AZ"), ("Philadelphia", "PA"), ("San Antonio", "TX"), ("San Diego", "CA"),
    ("Dallas", "TX"), ("Austin", "TX"), ("Jacksonville", "FL"), ("Columbus", "OH"),
    ("Charlotte", "NC"), ("Indianapolis", "IN"), ("Seattle", "WA"), ("Denver", "CO"),
    ("Boston", "MA"), ("Nashville", "TN"), ("Portland", "OR"), ("Atlanta", "GA"),
    ("Miami", "FL"), ("Minneapolis", "MN"), ("Springfield", "IL"), ("Madison", "WI"),
];

const COMPANY_PREFIXES: &[&str] = &[
    "Premier", "Summit", "Pioneer", "Apex", "Sterling", "Keystone", "Liberty",
    "Horizon", "Atlas", "Beacon", "Frontier", "Harbor", "Granite", "Meridian",
];

const INDUSTRIES: &[&str] = &[
    "Logistics", "Analytics", "Energy", "Biotech", "Semiconductor", "Retail",
    "Healthcare", "Software", "Mining", "Aerospace", "Foods", "Media", "Robotics",
    "Pharma", "Telecom", "Materials", "Insurance", "Realty", "Motors", "Networks",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Inc", "Corp", "Group", "Holdings", "Ltd", "PLC", "Co", "Partners", "Industries",
];

const WORDS: &[&str] = &[
    "Quantum", "Stellar", "Nova", "Orbit", "Pixel", "Ember", "Frost", "Lunar",
    "Solar", "Cipher", "Vertex", "Nimbus", "Pulse", "Echo", "Zephyr", "Prism",
    "Aurora", "Comet", "Drift", "Harbor", "Kite", "Maple", "Onyx", "Rally",
    "Sable", "Tide", "Vapor", "Wren", "Bolt", "Cobalt", "Delta", "Flux",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GeneratorSlot, RngBank};

    #[test]
    fn same_seed_same_text() {
        let mut rng_a = RngBank::new(12345).for_generator(GeneratorSlot::UserProfile);
        let mut rng_b = RngBank::new(12345).for_generator(GeneratorSlot::UserProfile);

        assert_eq!(NameGenerator::address(&mut rng_a), NameGenerator::address(&mut rng_b));
        assert_eq!(NameGenerator::email(&mut rng_a), NameGenerator::email(&mut rng_b));
    }

    #[test]
    fn names_and_words_are_drawn_from_their_lists() {
        let mut rng = RngBank::new(3).for_generator(GeneratorSlot::UserProfile);
        for _ in 0..100 {
            let first: &'static str = NameGenerator::first_name(&mut rng);
            let last: &'static str = NameGenerator::last_name(&mut rng);
            let word: &'static str = NameGenerator::word(&mut rng);
            assert!(FIRST_NAMES.contains(&first), "{first}");
            assert!(LAST_NAMES.contains(&last), "{last}");
            assert!(WORDS.contains(&word), "{word}");
        }
    }

    #[test]
    fn emails_have_one_at_and_a_domain() {
        let mut rng = RngBank::new(1).for_generator(GeneratorSlot::User);
        for _ in 0..200 {
            let email = NameGenerator::email(&mut rng);
            let (local, domain) = email.split_once('@').expect("email has @");
            assert!(!local.is_empty(), "empty local part: {email}");
            assert!(EMAIL_DOMAINS.contains(&domain), "unknown domain: {email}");
            assert_eq!(email, email.to_lowercase());
        }
    }

    #[test]
    fn addresses_are_single_line() {
        let mut rng = RngBank::new(2).for_generator(GeneratorSlot::UserProfile);
        for _ in 0..200 {
            let address = NameGenerator::address(&mut rng);
            assert!(!address.contains('\n'));
            assert!(address.split(", ").count() >= 3, "short address: {address}");
        }
    }

    #[test]
    fn company_names_have_three_words() {
        let mut rng = RngBank::new(3).for_generator(GeneratorSlot::Product);
        for _ in 0..100 {
            let name = NameGenerator::company_name(&mut rng);
            assert_eq!(name.split_whitespace().count(), 3, "odd company name: {name}");
        }
    }
}
