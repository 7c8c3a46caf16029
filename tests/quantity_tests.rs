#[cfg(test)]
mod tests {
    use unit_parsing::units::normalize_unit;
    use unit_parsing::{
        extract_quantity, Bundle, MillilitrePolicy, ParserConfig, QuantityExtractor,
        UnitParseError,
    };

    fn assert_quantity(input: &str, amount: f64, unit: &str) {
        match extract_quantity(input) {
            Ok(bundle) => assert_eq!(bundle, Bundle::new(amount, unit), "input: {input:?}"),
            Err(e) => panic!("input {input:?} failed: {e}"),
        }
    }

    fn assert_quantity_approx(input: &str, amount: f64, unit: &str) {
        let bundle = extract_quantity(input).unwrap();
        assert_eq!(bundle.unit(), unit, "input: {input:?}");
        assert!(
            (bundle.amount() - amount).abs() < 1e-9,
            "input {input:?}: expected {amount}, got {}",
            bundle.amount()
        );
    }

    #[test]
    fn test_counts() {
        assert_quantity("Mission White Corn Tortillas - 30 Count", 30.0, "count");
        assert_quantity("2 ct", 2.0, "count");
        assert_quantity("1 ct", 1.0, "count");
        assert_quantity("1/2ct", 0.5, "count");
        assert_quantity("1/8count", 0.125, "count");
        assert_quantity("Pacific Coast Style Clam Chowder Soup 1/2 count", 0.5, "count");
        assert_quantity("Pacific Coast Style Clam Chowder Soup 1/2ct", 0.5, "count");
        assert_quantity("Pacific Coast Style Clam Chowder Soup - 23ct", 23.0, "count");
        assert_quantity("Pacific Coast Style Clam Chowder Soup - 23ct ", 23.0, "count");
        assert_quantity("Pacific Coast Style Clam Chowder Soup - 23 ct", 23.0, "count");
    }

    #[test]
    fn test_packs_and_bunches() {
        assert_quantity(" 100 pack ", 100.0, "pack");
        assert_quantity("100pack", 100.0, "pack");
        assert_quantity("100 pk", 100.0, "pack");
        assert_quantity("0.5pk", 0.5, "pack");
        assert_quantity("1/2 pk", 0.5, "pack");
        assert_quantity(".3pack ", 0.3, "pack");
        assert_quantity("1/2 pack ", 0.5, "pack");
        assert_quantity("Cilantro 2 bunch", 2.0, "bunch");
        assert_quantity("1 / bunch", 1.0, "bunch");
        assert_quantity("3 bunches", 3.0, "bunch");
    }

    #[test]
    fn test_each() {
        assert_quantity("Seedless Mini Watermelon - 12 Each", 12.0, "each");
        assert_quantity("Seedless Mini Watermelon - Each", 1.0, "each");
        assert_quantity("1.3 ea", 1.3, "each");
        assert_quantity("1 each", 1.0, "each");
        assert_quantity("each", 1.0, "each");
        assert_quantity("1each", 1.0, "each");
        assert_quantity("3 / each", 3.0, "each");
    }

    #[test]
    fn test_ounces() {
        assert_quantity("De Nigris Vinegar Balsamic Bronze Eagle - 16.9 Fl. Oz.", 16.9, "oz");
        assert_quantity("Signature Cafe Pacific Coast Style Clam Chowder Soup - 24 Oz.", 24.0, "oz");
        assert_quantity("Azumaya Tofu Extra Firm - 14 Oz", 14.0, "oz");
        assert_quantity("Lawry's Signature Steakhouse Marinade - 12oz", 12.0, "oz");
        assert_quantity("Vegan Peach Ginger Kombucha - 15.2oz", 15.2, "oz");
        assert_quantity("1/2 oz ", 0.5, "oz");
        assert_quantity("10 oz", 10.0, "oz");
        assert_quantity("10 Oz", 10.0, "oz");
        assert_quantity("10.5 oz", 10.5, "oz");
        assert_quantity("14.75 oz", 14.75, "oz");
        assert_quantity("8 ounces", 8.0, "oz");
    }

    #[test]
    fn test_pounds() {
        assert_quantity("Squid Whole Raw Frozen - 3.00Lb", 48.0, "oz");
        assert_quantity("Squid Whole Raw Frozen - 3.00 LB", 48.0, "oz");
        assert_quantity("Squid Whole Raw Frozen3.00Lb", 48.0, "oz");
        assert_quantity("1/2 / lb", 8.0, "oz");
        assert_quantity("1/2 /lb", 8.0, "oz");
        assert_quantity(
            "Frozen Chicken Breast Tenderloins - 2.5lbs - Archer Farms\u{2122}",
            40.0,
            "oz",
        );
        assert_quantity("2 pounds", 32.0, "oz");
    }

    #[test]
    fn test_conversion_correctness() {
        assert_quantity("1 lb", 16.0, "oz");
        assert_quantity("1 gal", 128.0, "oz");
        assert_quantity("1 qt", 32.0, "oz");
        assert_quantity("1 pt", 16.0, "oz");
    }

    #[test]
    fn test_pints_quarts_gallons() {
        for input in ["1 pint", "1  pint ", "1 pt", "1pint "] {
            assert_quantity(input, 16.0, "oz");
        }
        for input in ["1 quart", "1  quart ", "1 qt", "1quart "] {
            assert_quantity(input, 32.0, "oz");
        }
        for input in ["1 gallon", "1  gallon ", "1 gal", "1gallon "] {
            assert_quantity(input, 128.0, "oz");
        }
        assert_quantity("1/2pt", 8.0, "oz");
        assert_quantity("1/2 qt", 16.0, "oz");
        assert_quantity("1/2gal", 64.0, "oz");
    }

    #[test]
    fn test_fraction_handling() {
        assert_quantity("1/2 lb", 8.0, "oz");
        assert_quantity("3 1/2 gal", 448.0, "oz");
        assert_quantity("3 1/2 pt", 56.0, "oz");
        assert_quantity("3 1/2 qt", 112.0, "oz");
        assert_quantity("3/4 1/2 gal", 160.0, "oz");
        assert_quantity("3.5 1/2 gallons", 512.0, "oz");
        assert_quantity("2 1/2 lb", 40.0, "oz");
    }

    #[test]
    fn test_half_gallon() {
        assert_quantity("Whole Milk half gallon", 64.0, "oz");
        assert_quantity("3 half gal", 192.0, "oz");
        assert_quantity("2 Half Gallons", 128.0, "oz");
    }

    #[test]
    fn test_millilitres_are_terminal_by_default() {
        assert_quantity("250ML", 250.0, "ml");
        assert_quantity("250 ml", 250.0, "ml");
        assert_quantity("Red Wine - 750 mL", 750.0, "ml");
    }

    #[test]
    fn test_millilitres_fold_into_ounces_when_configured() {
        let extractor = QuantityExtractor::with_config(ParserConfig {
            millilitre_policy: MillilitrePolicy::FoldIntoOunces,
            ..Default::default()
        })
        .unwrap();
        let bundle = extractor.extract("250ML").unwrap();
        assert_eq!(bundle.unit(), "oz");
        assert!((bundle.amount() - 8.453514).abs() < 1e-6);
    }

    #[test]
    fn test_count_times_volume() {
        assert_quantity("ham sandwich 4 ct/15.25 oz", 61.0, "oz");
        assert_quantity("4 ct/15.25 oz", 61.0, "oz");
        assert_quantity("4 ct / 15.25 oz", 61.0, "oz");
        assert_quantity("16 ct / 40 oz", 640.0, "oz");
        assert_quantity("24 ct / 50.8 oz", 1219.1999999999998, "oz");
        assert_quantity(
            "Land O' Lakes Mini Half & Half - Serve Pods - 192ct/54 fl oz",
            10368.0,
            "oz",
        );
        assert_quantity("B-Tea Raw & Organic Green Tea - 6pk/16 fl oz Bottles", 96.0, "oz");
        assert_quantity("15 cans / 12 fl oz", 180.0, "oz");
        assert_quantity("2 x 16 oz", 32.0, "oz");
    }

    #[test]
    fn test_range_times_ounce() {
        assert_quantity("Sparkling Water - 15-11 Fl Oz cans", 165.0, "oz");
        assert_quantity_approx("Soda - 6-11.2 Fl. Oz.", 67.2, "oz");
    }

    #[test]
    fn test_unit_without_number() {
        assert_quantity("oZ   ", 1.0, "oz");
        assert_quantity("  LB   ", 16.0, "oz");
        assert_quantity("  gallons   ", 128.0, "oz");
        for input in ["floz", "fl oz", "fl  oz", "fl  oz   ", "  fl  oz   ", "  fl    oz   ", "fl.oz"] {
            assert_quantity(input, 1.0, "oz");
        }
        for input in ["flgal", "fl gal", "fl  gal", "fl  gal   ", "  fl  gal   ", "fl.gal", "  fl.  gal   "] {
            assert_quantity(input, 128.0, "oz");
        }
    }

    #[test]
    fn test_unit_after_a_label_without_number() {
        assert_quantity("Ground Beef - LB", 16.0, "oz");
        assert_quantity("Whole Milk - Gallon", 128.0, "oz");
        assert_quantity("Chicken Thighs LB", 16.0, "oz");
        assert_quantity("Bulk Almonds per oz", 1.0, "oz");
        assert_quantity("Milk 2% half gallon", 64.0, "oz");
        assert_quantity("Organic Milk Half Gallon", 64.0, "oz");
    }

    #[test]
    fn test_large_fraction_terms() {
        assert_quantity("99999999999999999999/2 oz", 5e19, "oz");
    }

    #[test]
    fn test_first_match_precedence() {
        assert_quantity("4 ct / 15.25 oz 5 ct / 15.25 oz", 61.0, "oz");
        assert_quantity("Seedless Mini Watermelon - 12 Each 13ea ", 12.0, "each");
        assert_quantity("Seedless Mini Watermelon - 12 Each 13 each", 12.0, "each");
        assert_quantity("Coast Style Clam Chowder Soup 1/2 count 3/4 count", 0.5, "count");
    }

    #[test]
    fn test_case_normalization_is_idempotent() {
        for input in [
            "4 CT / 15.25 OZ",
            "3.00Lb",
            "1 Gallon",
            "100 PK",
            "250ML",
            "Seedless Mini Watermelon - EACH",
            "FL. GAL",
        ] {
            assert_eq!(
                extract_quantity(input).unwrap(),
                extract_quantity(input.to_lowercase().as_str()).unwrap(),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_round_trip_to_original_unit() {
        for (input, captured, unit) in [
            ("2.5 lb", 2.5, "lb"),
            ("3/4 pt", 0.75, "pt"),
            ("1.75 quarts", 1.75, "quarts"),
            ("0.3 gal", 0.3, "gal"),
            ("12.5 oz", 12.5, "oz"),
        ] {
            let bundle = extract_quantity(input).unwrap();
            let recovered = normalize_unit(unit).unwrap().from_canonical(bundle.amount());
            assert!((recovered - captured).abs() < 1e-9, "input: {input:?}");
        }
    }

    #[test]
    fn test_malformed_fraction_is_a_numeric_error() {
        for input in ["1/2/lb", "1/2/ lb", "1/2/LB", "Ground Beef 1/2/Lb"] {
            let err = extract_quantity(input).unwrap_err();
            assert!(err.is_numeric_error(), "input {input:?} gave {err}");
            assert!(matches!(err, UnitParseError::InvalidNumber { .. }));
            assert_eq!(err.offending_text(), Some(input));
        }
    }

    #[test]
    fn test_missing_units_raise_parse_error() {
        for input in [
            "1.3 easter egg",
            "Signature Cafe Pacific Coast Style Clam Chowder Soup - 23c ",
            "1.3 cantspell",
            "",
        ] {
            assert_eq!(
                extract_quantity(input),
                Err(UnitParseError::ParseQuantity(input.to_string())),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_null_input_raises_parse_error() {
        assert!(matches!(
            extract_quantity(None),
            Err(UnitParseError::ParseQuantity(ref text)) if text.is_empty()
        ));
    }

    #[test]
    fn test_concurrent_extraction() {
        let handles: Vec<_> = (1..=8)
            .map(|n| {
                std::thread::spawn(move || {
                    let input = format!("{n} lb");
                    extract_quantity(input.as_str()).unwrap()
                })
            })
            .collect();
        for (n, handle) in (1..=8).zip(handles) {
            assert_eq!(handle.join().unwrap(), Bundle::new(n as f64 * 16.0, "oz"));
        }
    }
}
