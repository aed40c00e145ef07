//! Utilization math shared by the gateway's overload fallback and the
//! orchestrator's overload defaults.

use serde_json::Value;

/// Fraction of a member's capacity currently assigned.
///
/// Capacity is clamped to at least one hour so an unset or zero capacity
/// never divides by zero.
pub fn utilization(assigned_hours: f64, capacity_hours: f64) -> f64 {
    assigned_hours / capacity_hours.max(1.0)
}

/// Top `n` workload entries by descending `utilization` field.
///
/// Entries without a numeric `utilization` rank as zero. The sort is stable,
/// so entries with equal utilization keep their input order.
pub fn top_overloaded(workloads: &[Value], n: usize) -> Vec<Value> {
    let mut ranked: Vec<&Value> = workloads.iter().collect();
    ranked.sort_by(|a, b| {
        let ua = entry_utilization(a);
        let ub = entry_utilization(b);
        ub.partial_cmp(&ua).unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.into_iter().take(n).cloned().collect()
}

fn entry_utilization(entry: &Value) -> f64 {
    entry
        .get("utilization")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn utilization_clamps_zero_capacity() {
        assert_eq!(utilization(12.0, 0.0), 12.0);
        assert_eq!(utilization(20.0, 40.0), 0.5);
    }

    #[test]
    fn top_overloaded_ranks_descending() {
        let workloads = vec![
            json!({"name": "ana", "utilization": 0.4}),
            json!({"name": "bo", "utilization": 1.2}),
            json!({"name": "cy", "utilization": 0.9}),
            json!({"name": "dee", "utilization": 0.1}),
        ];
        let top = top_overloaded(&workloads, 3);
        let names: Vec<&str> = top.iter().map(|w| w["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["bo", "cy", "ana"]);
    }

    #[test]
    fn top_overloaded_breaks_ties_by_input_order() {
        let workloads = vec![
            json!({"name": "first", "utilization": 0.8}),
            json!({"name": "second", "utilization": 0.8}),
            json!({"name": "third", "utilization": 0.8}),
            json!({"name": "fourth", "utilization": 0.8}),
        ];
        let top = top_overloaded(&workloads, 3);
        let names: Vec<&str> = top.iter().map(|w| w["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn top_overloaded_treats_missing_utilization_as_zero() {
        let workloads = vec![
            json!({"name": "quiet"}),
            json!({"name": "loud", "utilization": 0.3}),
        ];
        let top = top_overloaded(&workloads, 1);
        assert_eq!(top[0]["name"], "loud");
    }
}
