#[cfg(not(feature = "manual_test"))]
use afl::fuzz;
use dz_nin::{AlgerianNinChecksum, NinError, NinValidator, Validator};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(i) = input.iter().position(|b| *b == b',') {
        Some((&input[0..i], &input[i + 1..]))
    } else {
        None
    }
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (input, rand_seed) = split_bytes_once(bytes)?;

    let input_str = std::str::from_utf8(input).ok()?;

    let mut rng_seed: u64 = 0;
    for i in 0..8 {
        if rand_seed.len() > i {
            rng_seed <<= 8;
            rng_seed += rand_seed[i] as u64;
        }
    }

    let rng = StdRng::seed_from_u64(rng_seed);
    let validator = NinValidator::default();
    run_fuzz(&validator, input_str, rng);

    Some(())
}

fn gen_base(rng: &mut StdRng) -> String {
    (0..16)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

fn gen_whitespace(rng: &mut StdRng) -> char {
    match rng.gen_range::<u8, _>(0..4) {
        0 => ' ',
        1 => '\t',
        2 => '\n',
        _ => '\u{a0}',
    }
}

fn run_fuzz(validator: &NinValidator, input: &str, mut rng: StdRng) {
    #[cfg(feature = "manual_test")]
    {
        println!("Input: {:?}", input);
        println!("Input len: {:?}", input.len());
    }

    // arbitrary input: nothing may panic and every entry point must agree
    let details = validator.validate(input);
    let explanation = validator.explain(input);
    #[cfg(feature = "manual_test")]
    {
        println!("Details: {:?}", details);
        println!("Explanation: {:?}", explanation);
    }
    assert_eq!(details.is_valid, explanation.is_valid());
    assert_eq!(details.is_valid, AlgerianNinChecksum.is_valid_match(input));
    if details.is_valid {
        assert_eq!(details.error, None);
        assert_eq!(details.control_key, details.calculated_key);
    }

    match validator.generate(input) {
        Ok(nin) => assert!(validator.validate(&nin).is_valid),
        Err(err) => assert_eq!(err, NinError::MalformedBase),
    }

    // generated input: round trip with whitespace sprinkled in
    let base = gen_base(&mut rng);
    let nin = validator.generate(&base).unwrap();
    let mut spaced = String::new();
    for c in nin.chars() {
        if rng.gen_bool(0.2) {
            spaced.push(gen_whitespace(&mut rng));
        }
        spaced.push(c);
    }
    let round_trip = validator.validate(&spaced);
    assert!(round_trip.is_valid);
    assert_eq!(round_trip.raw, nin);
}
