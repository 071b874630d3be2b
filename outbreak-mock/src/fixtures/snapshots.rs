use outbreak_core::CountrySnapshot;

use super::countries;

/// (code, continent, population, cases, deaths, recovered, tests, vaccinations)
#[allow(clippy::type_complexity)]
const STATS: &[(&str, &str, u64, u64, u64, Option<u64>, u64, Option<u64>)] = &[
    ("BR", "South America", 215_313_498, 37_076_053, 699_276, Some(36_249_161), 63_776_166, Some(486_785_913)),
    ("FR", "Europe", 65_584_518, 39_866_718, 166_176, Some(39_524_311), 271_490_188, Some(154_770_923)),
    ("DE", "Europe", 83_883_596, 38_828_995, 174_979, Some(38_240_600), 122_332_384, Some(192_208_062)),
    ("IN", "Asia", 1_406_631_776, 44_690_738, 530_779, Some(44_150_289), 927_982_526, Some(2_206_135_624)),
    ("IT", "Europe", 60_262_770, 25_603_510, 188_322, Some(25_014_458), 269_187_957, Some(144_178_176)),
    ("JP", "Asia", 125_584_838, 33_320_438, 72_997, Some(21_783_109), 98_368_761, None),
    ("XKX", "Europe", 1_935_259, 273_387, 3_212, Some(273_385), 935_911, None),
    ("ZA", "Africa", 60_756_135, 4_076_463, 102_595, Some(3_912_506), 25_840_893, Some(38_188_838)),
    ("GB", "Europe", 68_497_907, 24_658_705, 204_171, None, 522_526_476, Some(151_215_371)),
    ("SLOW", "Nowhere", 1_000, 100, 1, None, 500, None),
    ("US", "North America", 334_805_269, 111_820_082, 1_219_487, Some(109_814_428), 1_186_851_502, Some(676_728_782)),
];

/// Fixed provider timestamp so fixtures are reproducible.
pub const UPDATED_AT_MS: i64 = 1_678_406_400_000;

pub fn by_code(code: &str) -> Option<CountrySnapshot> {
    let item = countries::by_code(code)?;
    let &(_, continent, population, cases, deaths, recovered, tests, vaccinations) =
        STATS.iter().find(|row| row.0 == item.code)?;
    let active = CountrySnapshot::derive_active(cases, deaths, recovered.unwrap_or(0));
    Some(CountrySnapshot {
        country: item.name,
        code: item.code,
        continent: Some(continent.to_string()),
        flag_url: item.flag_url,
        updated_at_epoch_ms: UPDATED_AT_MS,
        cases,
        deaths,
        active,
        recovered,
        tests: Some(tests),
        vaccinations,
        population: Some(population),
        today_cases: Some(0),
        today_deaths: Some(0),
        critical: None,
    })
}

pub fn vaccinations(code: &str) -> Option<Option<u64>> {
    by_code(code).map(|s| s.vaccinations)
}
