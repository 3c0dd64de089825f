//! Product class synonym families
//!
//! Handles class/type variations like "Bourbon" vs "Bourbon Whiskey" or
//! "IPA" vs "India Pale Ale" when the literal class statement is not found.

/// A base product class and the label phrasings that identify it
#[derive(Debug, Clone, Copy)]
pub struct SynonymFamily {
    pub base: &'static str,
    pub synonyms: &'static [&'static str],
}

pub const SYNONYM_FAMILIES: &[SynonymFamily] = &[
    // Spirits
    SynonymFamily {
        base: "bourbon",
        synonyms: &["bourbon whiskey", "bourbon whisky", "kentucky bourbon"],
    },
    SynonymFamily {
        base: "whiskey",
        synonyms: &["whisky", "scotch", "rye", "irish whiskey", "tennessee whiskey"],
    },
    SynonymFamily {
        base: "vodka",
        synonyms: &["vodka"],
    },
    SynonymFamily {
        base: "gin",
        synonyms: &["gin", "london dry gin", "dry gin"],
    },
    SynonymFamily {
        base: "rum",
        synonyms: &["rum", "dark rum", "light rum", "spiced rum"],
    },
    SynonymFamily {
        base: "tequila",
        synonyms: &["tequila", "anejo", "reposado", "blanco"],
    },
    SynonymFamily {
        base: "brandy",
        synonyms: &["brandy", "cognac", "armagnac"],
    },
    // Wine
    SynonymFamily {
        base: "red wine",
        synonyms: &["cabernet", "merlot", "pinot noir", "shiraz", "syrah", "zinfandel"],
    },
    SynonymFamily {
        base: "white wine",
        synonyms: &["chardonnay", "sauvignon blanc", "pinot grigio", "riesling"],
    },
    SynonymFamily {
        base: "rose",
        synonyms: &["rose", "rose wine"],
    },
    SynonymFamily {
        base: "sparkling wine",
        synonyms: &["champagne", "prosecco", "cava", "sparkling"],
    },
    // Beer
    SynonymFamily {
        base: "beer",
        synonyms: &["malt beverage", "ale", "lager"],
    },
    SynonymFamily {
        base: "ipa",
        synonyms: &["india pale ale", "ipa"],
    },
    SynonymFamily {
        base: "stout",
        synonyms: &["stout", "porter"],
    },
    SynonymFamily {
        base: "lager",
        synonyms: &["lager", "pilsner", "pilsener"],
    },
];

/// Find the synonym family an expected class belongs to
///
/// `expected` must already be lower-cased. A class belongs to a family when
/// it names the base, appears in the synonym list, or contains either as a
/// phrase ("straight bourbon whiskey" belongs to the bourbon family).
pub fn family_for(expected: &str) -> Option<&'static SynonymFamily> {
    SYNONYM_FAMILIES.iter().find(|family| {
        expected == family.base
            || expected.contains(family.base)
            || family.synonyms.iter().any(|s| *s == expected || expected.contains(s))
    })
}
