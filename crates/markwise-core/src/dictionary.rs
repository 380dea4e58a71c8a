//! Static unit dictionary.
//!
//! Maps the free-form unit tokens students type to a canonical singular
//! identifier. Lookup is case-sensitive as stored: capitalized spellings
//! that should be accepted appear as explicit variants rather than through
//! case folding, because case distinguishes real units (`M` molar vs `m`
//! meter, `T` tesla vs `t` tonne).

/// One unit with its accepted spellings. Compiled into the binary, never
/// mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDescriptor {
    pub singular: &'static str,
    pub plural: Option<&'static str>,
    pub abbr: Option<&'static str>,
    pub variants: &'static [&'static str],
}

const fn unit(
    singular: &'static str,
    plural: Option<&'static str>,
    abbr: Option<&'static str>,
    variants: &'static [&'static str],
) -> UnitDescriptor {
    UnitDescriptor {
        singular,
        plural,
        abbr,
        variants,
    }
}

/// Every unit the grading engine recognizes, grouped by quantity.
pub const UNITS: &[UnitDescriptor] = &[
    // amount
    unit("mole", Some("moles"), Some("mol"), &["Mole", "Moles"]),
    // angle
    unit("degree", Some("degrees"), Some("deg"), &["Degree", "Degrees"]),
    unit("radian", Some("radians"), Some("rad"), &["Radian", "Radians"]),
    // concentration
    unit("molar", None, Some("M"), &["Molar"]),
    unit("molal", None, None, &["Molal"]),
    // charge
    unit("coulomb", Some("coulombs"), Some("C"), &["Coulomb", "Coulombs"]),
    // current
    unit("ampere", Some("amperes"), Some("A"), &["amp", "amps", "Ampere", "Amperes"]),
    // energy
    unit("joule", Some("joules"), Some("J"), &["Joule", "Joules"]),
    unit("calorie", Some("calories"), Some("cal"), &["Calorie", "Calories"]),
    unit("kilocalorie", Some("kilocalories"), Some("kcal"), &[]),
    unit("electronvolt", Some("electronvolts"), Some("eV"), &[]),
    unit("btu", Some("btus"), Some("BTU"), &["BTUs"]),
    // force
    unit("newton", Some("newtons"), Some("N"), &["Newton", "Newtons"]),
    unit("dyne", Some("dynes"), Some("dyn"), &[]),
    // frequency
    unit("hertz", Some("hertz"), Some("Hz"), &["Hertz"]),
    // length
    unit("meter", Some("meters"), Some("m"), &["metre", "metres", "Meter", "Meters"]),
    unit("kilometer", Some("kilometers"), Some("km"), &["kilometre", "kilometres"]),
    unit("centimeter", Some("centimeters"), Some("cm"), &["centimetre", "centimetres"]),
    unit("millimeter", Some("millimeters"), Some("mm"), &["millimetre", "millimetres"]),
    unit("micrometer", Some("micrometers"), Some("µm"), &["micron", "microns"]),
    unit("nanometer", Some("nanometers"), Some("nm"), &["nanometre", "nanometres"]),
    unit("angstrom", Some("angstroms"), Some("Å"), &["Angstrom", "Angstroms"]),
    unit("inch", Some("inches"), Some("in"), &["Inch", "Inches"]),
    unit("foot", Some("feet"), Some("ft"), &["Foot", "Feet"]),
    unit("yard", Some("yards"), Some("yd"), &["Yard", "Yards"]),
    unit("mile", Some("miles"), Some("mi"), &["Mile", "Miles"]),
    // magnetic flux
    unit("weber", Some("webers"), Some("Wb"), &["Weber", "Webers"]),
    unit("tesla", Some("teslas"), Some("T"), &["Tesla", "Teslas"]),
    // mass
    unit("gram", Some("grams"), Some("g"), &["gramme", "Gram", "Grams"]),
    unit("kilogram", Some("kilograms"), Some("kg"), &["kilogramme", "Kilogram", "Kilograms"]),
    unit("milligram", Some("milligrams"), Some("mg"), &[]),
    unit("pound", Some("pounds"), Some("lb"), &["lbs", "Pound", "Pounds"]),
    unit("ounce", Some("ounces"), Some("oz"), &["Ounce", "Ounces"]),
    unit("slug", Some("slugs"), None, &[]),
    unit("tonne", Some("tonnes"), Some("t"), &["Tonne", "Tonnes"]),
    // power
    unit("watt", Some("watts"), Some("W"), &["Watt", "Watts"]),
    unit("kilowatt", Some("kilowatts"), Some("kW"), &[]),
    unit("horsepower", None, Some("hp"), &["Horsepower"]),
    // pressure
    unit("pascal", Some("pascals"), Some("Pa"), &["Pascal", "Pascals"]),
    unit("kilopascal", Some("kilopascals"), Some("kPa"), &[]),
    unit("atmosphere", Some("atmospheres"), Some("atm"), &["Atmosphere", "Atmospheres"]),
    unit("bar", Some("bars"), None, &[]),
    unit("torr", Some("torrs"), Some("Torr"), &[]),
    unit("psi", None, None, &["PSI"]),
    // resistance
    unit("ohm", Some("ohms"), Some("Ω"), &["Ohm", "Ohms"]),
    // temperature
    unit("kelvin", Some("kelvins"), Some("K"), &["Kelvin", "Kelvins"]),
    unit("celsius", None, None, &["Celsius", "centigrade", "Centigrade"]),
    unit("fahrenheit", None, None, &["Fahrenheit"]),
    // time
    unit("second", Some("seconds"), Some("s"), &["sec", "secs", "Second", "Seconds"]),
    unit("millisecond", Some("milliseconds"), Some("ms"), &[]),
    unit("minute", Some("minutes"), Some("min"), &["mins", "Minute", "Minutes"]),
    unit("hour", Some("hours"), Some("h"), &["hr", "hrs", "Hour", "Hours"]),
    unit("day", Some("days"), None, &["Day", "Days"]),
    unit("week", Some("weeks"), Some("wk"), &["Week", "Weeks"]),
    unit("year", Some("years"), Some("yr"), &["yrs", "Year", "Years"]),
    // voltage
    unit("volt", Some("volts"), Some("V"), &["Volt", "Volts"]),
    // capacitance
    unit("farad", Some("farads"), Some("F"), &["Farad", "Farads"]),
    // volume
    unit("liter", Some("liters"), Some("L"), &["litre", "litres", "Liter", "Liters"]),
    unit("milliliter", Some("milliliters"), Some("mL"), &["millilitre", "millilitres", "ml"]),
    unit("gallon", Some("gallons"), Some("gal"), &["Gallon", "Gallons"]),
    unit("quart", Some("quarts"), Some("qt"), &["Quart", "Quarts"]),
    unit("pint", Some("pints"), Some("pt"), &["Pint", "Pints"]),
    unit("cup", Some("cups"), None, &["Cup", "Cups"]),
];

/// Resolve a unit token against singular, plural, abbreviation, and
/// variant spellings.
pub fn find_unit(token: &str) -> Option<&'static UnitDescriptor> {
    UNITS.iter().find(|u| {
        u.singular == token
            || u.plural == Some(token)
            || u.abbr == Some(token)
            || u.variants.contains(&token)
    })
}

/// The canonical singular identifier for a token, if recognized.
pub fn find_unit_singular(token: &str) -> Option<&'static str> {
    find_unit(token).map(|u| u.singular)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_every_spelling() {
        assert_eq!(find_unit_singular("newton"), Some("newton"));
        assert_eq!(find_unit_singular("newtons"), Some("newton"));
        assert_eq!(find_unit_singular("N"), Some("newton"));
        assert_eq!(find_unit_singular("Newton"), Some("newton"));
    }

    #[test]
    fn case_distinguishes_real_units() {
        assert_eq!(find_unit_singular("M"), Some("molar"));
        assert_eq!(find_unit_singular("m"), Some("meter"));
        assert_eq!(find_unit_singular("T"), Some("tesla"));
        assert_eq!(find_unit_singular("t"), Some("tonne"));
    }

    #[test]
    fn capitalized_degrees_need_explicit_variants() {
        assert_eq!(find_unit_singular("Celsius"), Some("celsius"));
        assert_eq!(find_unit_singular("celsius"), Some("celsius"));
        assert_eq!(find_unit_singular("centigrade"), Some("celsius"));
    }

    #[test]
    fn unknown_tokens_miss() {
        assert_eq!(find_unit("parsnips"), None);
        assert_eq!(find_unit(""), None);
        // No case folding: an unlisted capitalization misses.
        assert_eq!(find_unit("METERS"), None);
    }

    #[test]
    fn spellings_resolve_to_the_same_descriptor() {
        assert_eq!(find_unit("m"), find_unit("meters"));
        assert_ne!(find_unit("m"), find_unit("M"));
    }

    #[test]
    fn singular_identifiers_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for u in UNITS {
            assert!(seen.insert(u.singular), "duplicate singular {}", u.singular);
        }
    }
}
