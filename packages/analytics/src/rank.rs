//! Top-performers ranking.

use bantay_analytics_models::RankedMunicipality;
use bantay_geography::Municipality;
use bantay_patrol_models::ClassificationResult;

/// Rows shown on the top-performers board in the reference deployment.
pub const DEFAULT_TOP_N: usize = 12;

/// Ranks municipalities by active percentage, then by total patrols, both
/// descending, and keeps the first `top_n` rows.
///
/// The sort is stable, so rows that tie on both keys keep the order they were
/// passed in. The input itself is never reordered.
#[must_use]
pub fn top_performers(
    results: &[(Municipality, ClassificationResult)],
    top_n: usize,
) -> Vec<RankedMunicipality> {
    let mut ranked: Vec<RankedMunicipality> = results
        .iter()
        .map(|&(municipality, result)| RankedMunicipality {
            municipality,
            active_percentage: result.active_percentage,
            total_patrols: result.total_patrols,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.active_percentage
            .cmp(&a.active_percentage)
            .then_with(|| b.total_patrols.cmp(&a.total_patrols))
    });
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use bantay_geography::Municipality;
    use bantay_patrol_models::ClassificationResult;

    use super::{DEFAULT_TOP_N, top_performers};

    fn result(active_percentage: u32, total_patrols: u32) -> ClassificationResult {
        ClassificationResult {
            active_percentage,
            total_patrols,
            ..ClassificationResult::default()
        }
    }

    #[test]
    fn orders_by_percentage_then_patrols() {
        let results = vec![
            (Municipality::SanIsidro, result(90, 120)),
            (Municipality::SantaCruz, result(90, 150)),
            (Municipality::Concepcion, result(95, 10)),
        ];

        let ranked = top_performers(&results, DEFAULT_TOP_N);
        let order: Vec<Municipality> = ranked.iter().map(|row| row.municipality).collect();
        assert_eq!(
            order,
            vec![
                Municipality::Concepcion,
                Municipality::SantaCruz,
                Municipality::SanIsidro,
            ]
        );
    }

    #[test]
    fn full_ties_keep_input_order() {
        let results = vec![
            (Municipality::SanMateo, result(80, 40)),
            (Municipality::BagongSilang, result(80, 40)),
            (Municipality::Malaya, result(80, 40)),
        ];

        let ranked = top_performers(&results, DEFAULT_TOP_N);
        let order: Vec<Municipality> = ranked.iter().map(|row| row.municipality).collect();
        assert_eq!(
            order,
            vec![
                Municipality::SanMateo,
                Municipality::BagongSilang,
                Municipality::Malaya,
            ]
        );
    }

    #[test]
    fn truncates_to_requested_rows() {
        let results = vec![
            (Municipality::SanIsidro, result(10, 1)),
            (Municipality::SantaCruz, result(20, 2)),
            (Municipality::Concepcion, result(30, 3)),
        ];

        let ranked = top_performers(&results, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].municipality, Municipality::Concepcion);
        assert_eq!(ranked[1].municipality, Municipality::SantaCruz);
    }

    #[test]
    fn input_is_left_untouched() {
        let results = vec![
            (Municipality::SanIsidro, result(10, 1)),
            (Municipality::SantaCruz, result(20, 2)),
        ];
        let before = results.clone();

        let _ = top_performers(&results, DEFAULT_TOP_N);
        assert_eq!(results, before);
    }
}
