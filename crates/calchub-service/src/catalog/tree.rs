//! Catalog tree assembly and search filtering.
//!
//! The tree is assembled in memory from the flat category and calculator
//! lists on every request; nothing hierarchical is persisted.

use std::collections::HashMap;

use uuid::Uuid;

use calchub_entity::calculator::Calculator;
use calchub_entity::catalog::{CalculatorSummary, CatalogNode};
use calchub_entity::category::Category;

/// Assemble the catalog tree from flat lists.
///
/// Categories are grouped by `parent_id` and attached recursively from
/// the roots; calculators attach to their owning category. Calculators
/// without a category (or pointing at a category that no longer exists)
/// are left out of the tree. Siblings and calculators are sorted by
/// `order` only; the sort is stable, so equal orders keep the store's
/// insertion order.
///
/// When `search` is non-empty the tree is filtered depth-first: a node
/// survives if it matches itself, owns a matching calculator, or has a
/// surviving descendant. Survivors keep only their matching calculators
/// and surviving children.
pub fn build_catalog_tree(
    categories: &[Category],
    calculators: &[Calculator],
    search: Option<&str>,
) -> Vec<CatalogNode> {
    let mut children_by_parent: HashMap<Option<Uuid>, Vec<&Category>> = HashMap::new();
    for category in categories {
        children_by_parent
            .entry(category.parent_id)
            .or_default()
            .push(category);
    }

    let mut calcs_by_category: HashMap<Uuid, Vec<&Calculator>> = HashMap::new();
    for calculator in calculators {
        if let Some(category_id) = calculator.category_id {
            calcs_by_category.entry(category_id).or_default().push(calculator);
        }
    }

    let mut roots: Vec<CatalogNode> = children_by_parent
        .get(&None)
        .map(|cats| {
            cats.iter()
                .map(|c| build_node(c, &children_by_parent, &calcs_by_category))
                .collect()
        })
        .unwrap_or_default();
    sort_nodes(&mut roots);

    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(query) => {
            let query = query.to_lowercase();
            roots.into_iter().filter_map(|node| filter_node(node, &query)).collect()
        }
        None => roots,
    }
}

fn build_node(
    category: &Category,
    children_by_parent: &HashMap<Option<Uuid>, Vec<&Category>>,
    calcs_by_category: &HashMap<Uuid, Vec<&Calculator>>,
) -> CatalogNode {
    let mut children: Vec<CatalogNode> = children_by_parent
        .get(&Some(category.id))
        .map(|cats| {
            cats.iter()
                .map(|c| build_node(c, children_by_parent, calcs_by_category))
                .collect()
        })
        .unwrap_or_default();
    sort_nodes(&mut children);

    let mut summaries: Vec<CalculatorSummary> = calcs_by_category
        .get(&category.id)
        .map(|calcs| {
            calcs
                .iter()
                .map(|c| CalculatorSummary {
                    id: c.id,
                    name: c.name.clone(),
                    description: c.description.clone(),
                    tags: c.tags.clone(),
                    order: c.order,
                    version: c.current_version,
                })
                .collect()
        })
        .unwrap_or_default();
    summaries.sort_by(|a, b| a.order.cmp(&b.order));

    CatalogNode {
        id: category.id,
        name: category.name.clone(),
        description: category.description.clone(),
        parent_id: category.parent_id,
        order: category.order,
        tags: category.tags.clone(),
        calculators: summaries,
        children,
    }
}

fn sort_nodes(nodes: &mut [CatalogNode]) {
    nodes.sort_by(|a, b| a.order.cmp(&b.order));
}

/// Depth-first search filter. Returns `None` when the node and its
/// entire subtree fail to match.
fn filter_node(mut node: CatalogNode, query: &str) -> Option<CatalogNode> {
    let self_matches = text_matches(&node.name, query)
        || text_matches(&node.description, query)
        || node.tags.iter().any(|t| text_matches(t, query));

    let matching_calcs: Vec<CalculatorSummary> = node
        .calculators
        .into_iter()
        .filter(|c| {
            text_matches(&c.name, query)
                || text_matches(&c.description, query)
                || c.tags.iter().any(|t| text_matches(t, query))
        })
        .collect();

    let surviving_children: Vec<CatalogNode> = node
        .children
        .into_iter()
        .filter_map(|child| filter_node(child, query))
        .collect();

    if self_matches || !matching_calcs.is_empty() || !surviving_children.is_empty() {
        node.calculators = matching_calcs;
        node.children = surviving_children;
        Some(node)
    } else {
        None
    }
}

fn text_matches(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(name: &str, parent_id: Option<Uuid>, order: i32, tags: &[&str]) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            parent_id,
            order,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn calculator(name: &str, category_id: Option<Uuid>, order: i32, tags: &[&str]) -> Calculator {
        Calculator {
            id: Uuid::new_v4(),
            category_id,
            name: name.to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            logic_source: String::new(),
            ui_document: serde_json::json!({}),
            current_version: 1,
            order,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_input_builds_empty_tree() {
        assert!(build_catalog_tree(&[], &[], None).is_empty());
    }

    #[test]
    fn test_children_attach_under_parents() {
        let finance = category("Finance", None, 0, &[]);
        let loans = category("Loans", Some(finance.id), 0, &[]);
        let savings = category("Savings", Some(finance.id), 1, &[]);

        let tree = build_catalog_tree(&[finance.clone(), loans, savings], &[], None);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, finance.id);
        let names: Vec<&str> = tree[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Loans", "Savings"]);
    }

    #[test]
    fn test_siblings_sorted_by_order_not_input_position() {
        let second = category("Second", None, 2, &[]);
        let first = category("First", None, 1, &[]);

        let tree = build_catalog_tree(&[second, first], &[], None);

        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_calculators_sorted_and_summarized() {
        let finance = category("Finance", None, 0, &[]);
        let mut tax = calculator("Tax", Some(finance.id), 1, &[]);
        tax.current_version = 4;
        let loan = calculator("Loan", Some(finance.id), 0, &[]);

        let tree = build_catalog_tree(&[finance], &[tax, loan], None);

        let calcs = &tree[0].calculators;
        assert_eq!(calcs[0].name, "Loan");
        assert_eq!(calcs[1].name, "Tax");
        assert_eq!(calcs[1].version, 4);
    }

    #[test]
    fn test_uncategorized_calculators_left_out() {
        let finance = category("Finance", None, 0, &[]);
        let orphan = calculator("Orphan", None, 0, &[]);
        let stray = calculator("Stray", Some(Uuid::new_v4()), 0, &[]);

        let tree = build_catalog_tree(&[finance], &[orphan, stray], None);

        assert!(tree[0].calculators.is_empty());
    }

    #[test]
    fn test_search_keeps_ancestors_of_matching_calculator() {
        let finance = category("Finance", None, 0, &[]);
        let loans = category("Loans", Some(finance.id), 0, &[]);
        let health = category("Health", None, 1, &[]);
        let mortgage = calculator("Mortgage Payment", Some(loans.id), 0, &[]);
        let bmi = calculator("BMI", Some(health.id), 0, &[]);

        let tree = build_catalog_tree(
            &[finance.clone(), loans.clone(), health],
            &[mortgage, bmi],
            Some("mortgage"),
        );

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, finance.id);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, loans.id);
        assert_eq!(tree[0].children[0].calculators.len(), 1);
    }

    #[test]
    fn test_search_matches_tags_case_insensitive() {
        let health = category("Health", None, 0, &["wellness"]);

        let tree = build_catalog_tree(&[health.clone()], &[], Some("WELLNESS"));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, health.id);
    }

    #[test]
    fn test_self_matching_node_drops_non_matching_calculators() {
        let finance = category("Finance", None, 0, &[]);
        let bmi = calculator("BMI", Some(finance.id), 0, &[]);

        let tree = build_catalog_tree(&[finance], &[bmi], Some("finance"));

        assert_eq!(tree.len(), 1);
        assert!(tree[0].calculators.is_empty());
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        let finance = category("Finance", None, 0, &[]);

        let tree = build_catalog_tree(&[finance], &[], Some("   "));

        assert_eq!(tree.len(), 1);
    }

    fn flatten(
        nodes: &[CatalogNode],
        categories: &mut Vec<Category>,
        calculators: &mut Vec<Calculator>,
    ) {
        for node in nodes {
            categories.push(Category {
                id: node.id,
                name: node.name.clone(),
                description: node.description.clone(),
                parent_id: node.parent_id,
                order: node.order,
                tags: node.tags.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
            for calc in &node.calculators {
                calculators.push(Calculator {
                    id: calc.id,
                    category_id: Some(node.id),
                    name: calc.name.clone(),
                    description: calc.description.clone(),
                    tags: calc.tags.clone(),
                    logic_source: String::new(),
                    ui_document: serde_json::json!({}),
                    current_version: calc.version,
                    order: calc.order,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                });
            }
            flatten(&node.children, categories, calculators);
        }
    }

    #[test]
    fn test_equal_order_siblings_keep_insertion_order() {
        let zeta = category("Zeta", None, 0, &[]);
        let alpha = category("Alpha", None, 0, &[]);

        let tree = build_catalog_tree(&[zeta, alpha], &[], None);

        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_equal_order_calculators_keep_insertion_order() {
        let finance = category("Finance", None, 0, &[]);
        let tax = calculator("Tax", Some(finance.id), 0, &[]);
        let loan = calculator("Loan", Some(finance.id), 0, &[]);

        let tree = build_catalog_tree(&[finance], &[tax, loan], None);

        let names: Vec<&str> = tree[0].calculators.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Tax", "Loan"]);
    }

    #[test]
    fn test_tree_flattens_back_to_input_categories() {
        let finance = category("Finance", None, 1, &["money"]);
        let loans = category("Loans", Some(finance.id), 0, &[]);
        let health = category("Health", None, 0, &[]);
        let input = vec![finance, loans, health];

        let tree = build_catalog_tree(&input, &[], None);

        let mut flat = Vec::new();
        flatten(&tree, &mut flat, &mut Vec::new());
        let key = |c: &Category| (c.id, c.parent_id, c.name.clone(), c.order, c.tags.clone());
        let mut expected: Vec<_> = input.iter().map(key).collect();
        let mut actual: Vec<_> = flat.iter().map(key).collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let finance = category("Finance", None, 0, &[]);
        let loans = category("Loans", Some(finance.id), 0, &[]);
        let health = category("Health", None, 1, &[]);
        let loan = calculator("Loan", Some(loans.id), 0, &["money"]);
        let bmi = calculator("BMI", Some(health.id), 0, &[]);

        let once = build_catalog_tree(&[finance, loans, health], &[loan, bmi], Some("money"));

        let mut categories = Vec::new();
        let mut calculators = Vec::new();
        flatten(&once, &mut categories, &mut calculators);
        let twice = build_catalog_tree(&categories, &calculators, Some("money"));

        assert_eq!(
            serde_json::to_value(&once).unwrap(),
            serde_json::to_value(&twice).unwrap()
        );
    }
}
