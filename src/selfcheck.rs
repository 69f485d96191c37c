use std::io::Write;

use anyhow::Result;
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bag::Bag;
use crate::constants::{Value, PARTIAL_FILL, RANDOM_VALUE_RANGE, REFERENCE_VALUES};

#[derive(Debug, Default)]
pub struct Report {
    pub passed: usize,
    pub failures: Vec<String>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }
}

// The three bags every section starts from: empty, partially full, full.
struct Fixtures {
    trashcan: Bag,
    recycling: Bag,
    dumpster: Bag,
}

impl Fixtures {
    fn new() -> Fixtures {
        let mut recycling = Bag::new();
        fill(&mut recycling, &REFERENCE_VALUES[..PARTIAL_FILL]);
        let mut dumpster = Bag::new();
        fill(&mut dumpster, &REFERENCE_VALUES);
        Fixtures {
            trashcan: Bag::new(),
            recycling,
            dumpster,
        }
    }
}

fn fill(bag: &mut Bag, values: &[Value]) {
    for &value in values {
        bag.insert(value);
    }
}

/// Runs a fixed sequence of checks against `Bag`, narrating each section to
/// `out` and collecting failures into a `Report`.
pub struct SelfCheck<'a, W: Write> {
    out: &'a mut W,
    report: Report,
}

impl<'a, W: Write> SelfCheck<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        SelfCheck {
            out,
            report: Report::default(),
        }
    }

    pub fn check(&mut self, expr: bool, msg: &str) -> bool {
        if expr {
            self.report.passed += 1;
        } else {
            error!("FAILED: {}", msg);
            self.report.failures.push(msg.to_owned());
        }
        expr
    }

    pub fn run_all(&mut self) -> Result<()> {
        writeln!(self.out, "testing bag functions...")?;
        self.test_constructor()?;
        self.test_size()?;
        self.test_empty()?;
        self.test_insert()?;
        self.test_erase()?;
        self.test_clear()?;
        self.test_count()?;
        self.test_contains()?;
        self.test_write()?;
        Ok(())
    }

    fn section(&mut self, name: &str) -> Result<()> {
        writeln!(self.out, "testing {}...", name)?;
        Ok(())
    }

    fn test_constructor(&mut self) -> Result<()> {
        self.section("constructor")?;
        let trashcan = Bag::new();
        self.check(trashcan.is_empty(), "the trashcan should be empty.");
        self.check(trashcan.size() == 0, "the trashcan size should be 0.");
        Ok(())
    }

    fn test_size(&mut self) -> Result<()> {
        self.section("size function")?;
        let f = Fixtures::new();
        self.check(f.trashcan.size() == 0, "the trashcan size should be 0.");
        self.check(f.recycling.size() == 6, "the recycling size should be 6.");
        self.check(f.dumpster.size() == 20, "the dumpster size should be 20.");
        Ok(())
    }

    fn test_empty(&mut self) -> Result<()> {
        self.section("empty function")?;
        let f = Fixtures::new();
        self.check(f.trashcan.is_empty(), "the trashcan should be empty.");
        self.check(!f.recycling.is_empty(), "the recycling shouldn't be empty.");
        self.check(!f.dumpster.is_empty(), "the dumpster shouldn't be empty.");
        self.check(f.dumpster.is_full(), "the dumpster should be full.");
        Ok(())
    }

    fn test_insert(&mut self) -> Result<()> {
        self.section("insert function")?;
        let mut f = Fixtures::new();
        f.trashcan.insert(8);
        self.check(f.trashcan.size() == 1, "the trashcan size should be 1.");
        self.check(f.trashcan.count(8) == 1, "the trashcan should contain one 8.");
        writeln!(self.out, "writing trashcan to test insert...")?;
        f.trashcan.write(self.out)?;
        writeln!(self.out)?;

        self.check(
            f.dumpster.try_insert(8).is_err(),
            "inserting into the dumpster should be refused.",
        );
        self.check(
            f.dumpster.count(8) == 3,
            "a refused insert shouldn't change the dumpster.",
        );
        Ok(())
    }

    fn test_erase(&mut self) -> Result<()> {
        self.section("erase function")?;
        let mut f = Fixtures::new();

        f.recycling.erase(2);
        self.check(!f.recycling.contains(2), "recycling shouldn't contain 2.");
        self.check(f.recycling.size() == 5, "the recycling size should be 5.");

        f.dumpster.erase(8);
        self.check(!f.dumpster.contains(8), "dumpster shouldn't contain 8.");
        self.check(f.dumpster.size() == 17, "the dumpster size should be 17.");
        f.dumpster.erase(2);
        f.dumpster.erase(9);
        self.check(!f.dumpster.contains(2), "dumpster shouldn't contain 2.");
        self.check(!f.dumpster.contains(9), "dumpster shouldn't contain 9.");
        self.check(f.dumpster.size() == 15, "the dumpster size should be 15.");

        f.trashcan.erase(1);
        self.check(f.trashcan.is_empty(), "erasing from the trashcan should do nothing.");
        Ok(())
    }

    fn test_clear(&mut self) -> Result<()> {
        self.section("clear function")?;
        let mut trashcan = Bag::new();
        trashcan.insert(2);
        trashcan.clear();
        self.check(trashcan.is_empty(), "trashcan should be empty after clear.");

        let mut f = Fixtures::new();
        f.dumpster.clear();
        self.check(f.dumpster.size() == 0, "dumpster should be empty after clear.");
        Ok(())
    }

    fn test_count(&mut self) -> Result<()> {
        self.section("count function")?;
        let f = Fixtures::new();
        self.check(f.recycling.count(20) == 0, "recycling shouldn't contain 20.");
        self.check(f.dumpster.count(8) == 3, "dumpster should contain 3 8's.");
        self.check(f.dumpster.count(14) == 2, "dumpster should contain 2 14's.");
        Ok(())
    }

    fn test_contains(&mut self) -> Result<()> {
        self.section("contains function")?;
        let f = Fixtures::new();
        self.check(!f.trashcan.contains(1), "trashcan shouldn't contain 1.");
        self.check(!f.recycling.contains(78), "recycling shouldn't contain 78.");
        self.check(f.dumpster.contains(1), "dumpster should contain 1.");
        Ok(())
    }

    fn test_write(&mut self) -> Result<()> {
        self.section("write function")?;
        let mut f = Fixtures::new();

        self.check(f.trashcan.to_string() == "{}", "the trashcan should write as {}.");

        f.trashcan.insert(777);
        writeln!(self.out, "inserted 777 into trashcan...writing...")?;
        f.trashcan.write(self.out)?;
        writeln!(self.out)?;

        writeln!(self.out, "writing recycling...")?;
        f.recycling.write(self.out)?;
        writeln!(self.out)?;

        writeln!(self.out, "writing dumpster...")?;
        f.dumpster.write(self.out)?;
        writeln!(self.out)?;

        f.recycling.erase(2);
        let written = f.recycling.to_string();
        let reparsed = written.parse::<Bag>();
        self.check(
            matches!(reparsed, Ok(ref bag) if bag.same_elements(&f.recycling)),
            "recycling should read back from its written form.",
        );
        self.check(!written.contains('2'), "written recycling shouldn't contain 2.");
        Ok(())
    }

    /// Applies a seeded random sequence of inserts, erases and clears to a bag
    /// and to a plain vector, comparing sizes and counts after every step.
    pub fn run_random(&mut self, rounds: usize, seed: u64) -> Result<()> {
        writeln!(
            self.out,
            "running {} randomized rounds (seed {})...",
            rounds, seed
        )?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bag = Bag::new();
        let mut model: Vec<Value> = Vec::new();

        for round in 0..rounds {
            let value = rng.gen_range(0..RANDOM_VALUE_RANGE);
            match rng.gen_range(0..10) {
                0..=5 => {
                    if bag.is_full() {
                        let refused = bag.try_insert(value).is_err();
                        self.check(
                            refused,
                            &format!("round {}: full bag accepted {}", round, value),
                        );
                    } else {
                        bag.insert(value);
                        model.push(value);
                    }
                }
                6..=8 => {
                    bag.erase(value);
                    model.retain(|&v| v != value);
                    self.check(
                        !bag.contains(value),
                        &format!("round {}: {} survived erase", round, value),
                    );
                }
                _ => {
                    bag.clear();
                    model.clear();
                }
            }

            let sizes_match = bag.size() == model.len();
            let counts_match = (0..RANDOM_VALUE_RANGE)
                .all(|v| bag.count(v) == model.iter().filter(|&&m| m == v).count());
            self.check(
                sizes_match && counts_match,
                &format!("round {}: bag {} disagrees with {:?}", round, bag, model),
            );
        }
        Ok(())
    }

    pub fn finish(self) -> Report {
        info!(
            "{} of {} checks passed",
            self.report.passed,
            self.report.total()
        );
        self.report
    }
}

/// Inserts into a full bag. This always panics; it exists to show the
/// capacity precondition firing.
pub fn demonstrate_overflow<W: Write>(out: &mut W) -> Result<()> {
    let mut f = Fixtures::new();
    writeln!(out, "inserting into a full dumpster...")?;
    out.flush()?;
    f.dumpster.insert(8);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_checks_pass() {
        let mut out = Vec::new();
        let mut check = SelfCheck::new(&mut out);
        check.run_all().unwrap();
        let report = check.finish();
        assert!(report.is_success(), "{:?}", report.failures);
        assert!(report.passed > 20);
    }

    #[test]
    fn narration() {
        let mut out = Vec::new();
        let mut check = SelfCheck::new(&mut out);
        check.run_all().unwrap();
        check.finish();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("testing bag functions...\ntesting constructor...\n"));
        assert!(text.contains("testing write function...\n"));
        assert!(text.contains("writing trashcan to test insert...\n{8}\n"));
        assert!(text.contains("inserted 777 into trashcan...writing...\n{777}\n"));
        assert!(text.contains("writing recycling...\n{1,2,3,4,5,6}\n"));
        assert!(text.contains(
            "writing dumpster...\n{1,2,3,4,5,6,7,8,8,8,9,10,11,12,13,14,14,15,19,20}\n"
        ));
    }

    #[test]
    fn failed_check_is_recorded() {
        let mut out = Vec::new();
        let mut check = SelfCheck::new(&mut out);
        assert!(check.check(true, "fine"));
        assert!(!check.check(false, "broken"));
        let report = check.finish();
        assert_eq!(report.passed, 1);
        assert_eq!(report.failures, vec!["broken".to_owned()]);
        assert_eq!(report.total(), 2);
        assert!(!report.is_success());
    }

    #[test]
    fn random_rounds_pass() {
        let mut out = Vec::new();
        let mut check = SelfCheck::new(&mut out);
        check.run_random(500, 42).unwrap();
        let report = check.finish();
        assert!(report.is_success(), "{:?}", report.failures);
        assert!(report.passed >= 500);
    }

    #[test]
    #[should_panic(expected = "bag is full")]
    fn overflow_panics() {
        let mut out = Vec::new();
        demonstrate_overflow(&mut out).unwrap();
    }
}
