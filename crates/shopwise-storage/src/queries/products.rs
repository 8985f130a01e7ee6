// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog queries.

use std::str::FromStr;

use rusqlite::types::{Type, Value};
use shopwise_core::ShopwiseError;
use shopwise_core::types::{
    FieldMatch, Product, ProductField, ProductQuery, ProductStatus, StoreSummary, Variant,
};

use crate::database::{Database, LOWER_FN, map_tr_err};

const PRODUCT_COLUMNS: &str = "p.id, p.title, p.description, p.category, p.brand, p.status, \
     p.chat_enabled, p.price, p.handle, p.images, s.id, s.workspace_id, s.name, s.domain";

fn column(field: ProductField) -> &'static str {
    match field {
        ProductField::Title => "p.title",
        ProductField::Description => "p.description",
        ProductField::Category => "p.category",
        ProductField::Brand => "p.brand",
    }
}

/// Lower-case the needle and escape LIKE metacharacters so it matches
/// literally against a [`LOWER_FN`]-folded column.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Build the SQL text and bound parameters for a catalog query.
fn build_sql(query: &ProductQuery) -> (String, Vec<Value>) {
    let mut params = vec![Value::Text(query.workspace_id.clone())];
    let predicates: Vec<String> = query
        .any_of
        .iter()
        .map(|FieldMatch { field, needle }| {
            params.push(Value::Text(like_pattern(needle)));
            format!(
                "{LOWER_FN}({}) LIKE ?{} ESCAPE '\\'",
                column(*field),
                params.len()
            )
        })
        .collect();

    let mut sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products p JOIN stores s ON s.id = p.store_id \
         WHERE s.workspace_id = ?1 AND p.status = 'ACTIVE' AND ({})",
        predicates.join(" OR ")
    );
    if query.require_in_stock {
        sql.push_str(
            " AND EXISTS (SELECT 1 FROM variants v WHERE v.product_id = p.id AND v.stock > 0)",
        );
    }
    params.push(Value::Integer(
        i64::try_from(query.limit).unwrap_or(i64::MAX),
    ));
    sql.push_str(&format!(" ORDER BY p.rowid LIMIT ?{}", params.len()));
    (sql, params)
}

fn conversion_error(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn product_from_row(row: &rusqlite::Row<'_>) -> Result<Product, rusqlite::Error> {
    let status: String = row.get(5)?;
    let status = ProductStatus::from_str(&status).map_err(|e| conversion_error(5, e))?;
    let images: String = row.get(9)?;
    let images: Vec<String> =
        serde_json::from_str(&images).map_err(|e| conversion_error(9, e))?;

    Ok(Product {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        brand: row.get(4)?,
        status,
        chat_enabled: row.get(6)?,
        price: row.get(7)?,
        handle: row.get(8)?,
        images,
        variants: Vec::new(),
        store: StoreSummary {
            id: row.get(10)?,
            workspace_id: row.get(11)?,
            name: row.get(12)?,
            domain: row.get(13)?,
        },
    })
}

fn load_variants(
    conn: &rusqlite::Connection,
    product_id: &str,
) -> Result<Vec<Variant>, rusqlite::Error> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, price, stock, sku FROM variants \
         WHERE product_id = ?1 ORDER BY price ASC, rowid ASC",
    )?;
    let rows = stmt.query_map([product_id], |row| {
        Ok(Variant {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
            stock: row.get(3)?,
            sku: row.get(4)?,
        })
    })?;
    rows.collect()
}

/// Find active products in the query's workspace matching any predicate.
///
/// A query without predicates matches nothing.
pub async fn find_products(
    db: &Database,
    query: &ProductQuery,
) -> Result<Vec<Product>, ShopwiseError> {
    if query.any_of.is_empty() || query.limit == 0 {
        return Ok(Vec::new());
    }
    let (sql, params) = build_sql(query);

    db.connection()
        .call(move |conn| -> Result<Vec<Product>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(params), product_from_row)?;
            let mut products = rows.collect::<Result<Vec<_>, _>>()?;
            for product in &mut products {
                product.variants = load_variants(conn, &product.id)?;
            }
            Ok(products)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(like_pattern("ring"), "%ring%");
    }

    #[test]
    fn like_pattern_lowercases_unicode() {
        assert_eq!(like_pattern("ÉCHARPE"), "%écharpe%");
    }

    #[test]
    fn sql_ors_predicates_and_ands_stock_filter() {
        let query = ProductQuery {
            workspace_id: "ws".into(),
            any_of: vec![
                FieldMatch::new(ProductField::Title, "ring"),
                FieldMatch::new(ProductField::Brand, "ring"),
            ],
            require_in_stock: true,
            limit: 3,
        };
        let (sql, params) = build_sql(&query);
        assert!(sql.contains(
            "ulower(p.title) LIKE ?2 ESCAPE '\\' OR ulower(p.brand) LIKE ?3 ESCAPE '\\'"
        ));
        assert!(sql.contains("v.stock > 0"));
        assert!(sql.ends_with("LIMIT ?4"));
        assert_eq!(params.len(), 4);
        assert_eq!(params[3], Value::Integer(3));
    }
}
