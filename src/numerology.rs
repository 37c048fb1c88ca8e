use chrono::{Datelike, NaiveDate};

/// Master numbers are exempt from further reduction in the life path
/// calculation (and only there).
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

fn is_master(n: u32) -> bool {
    MASTER_NUMBERS.contains(&n)
}

fn fold_once(n: u32) -> u32 {
    n / 10 + n % 10
}

/// Life path number for a birth-date string.
///
/// Strips everything that is not an ASCII digit, sums the digits, then folds
/// tens + ones until the value is a single digit or a master number. An
/// empty or digit-free input yields 0 rather than an error.
pub fn life_path(dob: &str) -> u32 {
    let mut n: u32 = dob
        .chars()
        .filter_map(|c| c.to_digit(10))
        .sum();

    while n > 9 && !is_master(n) {
        n = fold_once(n);
    }
    n
}

/// Daily number for a date given a life path.
///
/// Day + month + year + life path, folded to a single digit. Unlike
/// `life_path` there is no master-number stop here; 11, 22 and 33 keep
/// reducing.
pub fn daily_number(life_path: u32, date: NaiveDate) -> u32 {
    let year = date.year().max(0) as u32;
    let mut n = date.day() + date.month() + year + life_path;

    while n > 9 {
        n = fold_once(n);
    }
    n
}

/// One entry of the fixed daily-reading table.
#[derive(Debug, PartialEq, Eq)]
pub struct Reading {
    pub prediction: &'static str,
    pub color: &'static str,
    pub number: i32,
    pub affirmation: &'static str,
    pub activity: &'static str,
    pub quote: &'static str,
    pub focus_area: &'static str,
}

static READINGS: [Reading; 9] = [
    Reading {
        prediction: "A day of new beginnings. Take the first step on something you have been postponing.",
        color: "Red",
        number: 1,
        affirmation: "I lead my own way forward.",
        activity: "Start a project you have been putting off",
        quote: "The journey of a thousand miles begins with a single step.",
        focus_area: "Initiative",
    },
    Reading {
        prediction: "Partnerships carry the day. Listen twice as much as you speak.",
        color: "Orange",
        number: 2,
        affirmation: "I find strength in cooperation.",
        activity: "Reach out to someone you trust",
        quote: "Alone we can do so little; together we can do so much.",
        focus_area: "Harmony",
    },
    Reading {
        prediction: "Creative energy is high. Express what you usually keep to yourself.",
        color: "Yellow",
        number: 3,
        affirmation: "My voice deserves to be heard.",
        activity: "Write, draw or sing for twenty minutes",
        quote: "Creativity is intelligence having fun.",
        focus_area: "Expression",
    },
    Reading {
        prediction: "Structure rewards you today. Small disciplined efforts compound.",
        color: "Green",
        number: 4,
        affirmation: "I build my future one brick at a time.",
        activity: "Organize one corner of your life",
        quote: "Well begun is half done.",
        focus_area: "Foundation",
    },
    Reading {
        prediction: "Change is in the air. Say yes to the unfamiliar.",
        color: "Blue",
        number: 5,
        affirmation: "I welcome what I cannot predict.",
        activity: "Take a different route than usual",
        quote: "Life is either a daring adventure or nothing at all.",
        focus_area: "Freedom",
    },
    Reading {
        prediction: "Home and heart come first. Someone close needs your care.",
        color: "Indigo",
        number: 6,
        affirmation: "I give and receive love freely.",
        activity: "Cook or share a meal with someone",
        quote: "Where there is love there is life.",
        focus_area: "Nurture",
    },
    Reading {
        prediction: "A reflective day. Answers come from quiet, not from noise.",
        color: "Violet",
        number: 7,
        affirmation: "I trust my inner knowing.",
        activity: "Spend time alone in nature",
        quote: "Knowing yourself is the beginning of all wisdom.",
        focus_area: "Insight",
    },
    Reading {
        prediction: "Material matters move in your favor. Act decisively on money and work.",
        color: "Gold",
        number: 8,
        affirmation: "I am capable of building abundance.",
        activity: "Review your finances or negotiate",
        quote: "Opportunities multiply as they are seized.",
        focus_area: "Abundance",
    },
    Reading {
        prediction: "A cycle closes. Release what no longer serves you.",
        color: "White",
        number: 9,
        affirmation: "I let go with gratitude.",
        activity: "Give something away",
        quote: "Every new beginning comes from some other beginning's end.",
        focus_area: "Completion",
    },
];

static FALLBACK_READING: Reading = Reading {
    prediction: "A neutral day. Keep your footing and let events settle.",
    color: "Gray",
    number: 0,
    affirmation: "I am steady whatever the day brings.",
    activity: "Rest and observe",
    quote: "Balance is not something you find, it is something you create.",
    focus_area: "Balance",
};

/// Daily reading for a daily number. Values outside 1..=9 cannot occur after
/// the fold, but out-of-table input still gets the fallback entry.
pub fn reading(daily: u32) -> &'static Reading {
    match daily {
        1..=9 => &READINGS[(daily - 1) as usize],
        _ => &FALLBACK_READING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn life_path_worked_example() {
        // 0+1+0+1+1+9+9+0 = 21 -> 3
        assert_eq!(life_path("01/01/1990"), 3);
    }

    #[test]
    fn life_path_stops_at_master_numbers() {
        // digit sum 11 stays 11
        assert_eq!(life_path("10/02/2024"), 11);
        // digit sum 22 stays 22
        assert_eq!(life_path("09/04/2007"), 22);
        // digit sum 33 stays 33
        assert_eq!(life_path("29/09/1903"), 33);
        // digit sum 29 folds to 11 and stops there
        assert_eq!(life_path("19/09/1900"), 11);
    }

    #[test]
    fn life_path_is_in_expected_range() {
        let dobs = [
            "1990-01-01",
            "2000-12-31",
            "07/04/1776",
            "31.12.1999",
            "1",
            "999999999",
        ];
        for dob in dobs {
            let lp = life_path(dob);
            assert!(
                (1..=9).contains(&lp) || is_master(lp),
                "life_path({dob:?}) = {lp}"
            );
        }
    }

    #[test]
    fn life_path_degrades_on_empty_or_non_numeric() {
        assert_eq!(life_path(""), 0);
        assert_eq!(life_path("no digits here"), 0);
    }

    #[test]
    fn daily_number_is_single_digit() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        for lp in [0, 1, 9, 11, 22, 33] {
            let d = daily_number(lp, date);
            assert!(d <= 9, "daily_number({lp}, {date}) = {d}");
        }
    }

    #[test]
    fn daily_number_has_no_master_exception() {
        // 2 + 9 + 2016 = 2027 -> 209 -> 29 -> 11 -> 2, folding straight through 11
        let date = NaiveDate::from_ymd_opt(2016, 9, 2).unwrap();
        assert_eq!(daily_number(0, date), 2);
    }

    #[test]
    fn reading_table_is_fixed() {
        assert_eq!(reading(1).color, "Red");
        assert_eq!(reading(1).number, 1);
        assert_eq!(reading(5).color, "Blue");
        assert_eq!(reading(5).focus_area, "Freedom");
        assert_eq!(reading(9).color, "White");
        for n in 1..=9u32 {
            assert_eq!(reading(n).number as u32, n);
        }
    }

    #[test]
    fn reading_falls_back_outside_table() {
        for n in [0, 10, 11, 99, u32::MAX] {
            let r = reading(n);
            assert_eq!(r.color, "Gray");
            assert_eq!(r.focus_area, "Balance");
        }
    }

    #[test]
    fn same_inputs_same_reading() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let a = daily_number(life_path("14/02/1988"), date);
        let b = daily_number(life_path("14/02/1988"), date);
        assert_eq!(a, b);
        assert_eq!(reading(a), reading(b));
    }
}
