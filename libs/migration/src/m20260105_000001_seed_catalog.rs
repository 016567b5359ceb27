use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            INSERT INTO categories (id, name)
            VALUES (1, 'Books'), (2, 'Electronics'), (3, 'Computers')
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO products (id, name, description, price, img_url, date)
            VALUES
                (1, 'The Lord of the Rings', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 90.50, 'https://img.example.com/products/1-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '0 days'),
                (2, 'Smart TV', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2190.00, 'https://img.example.com/products/2-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '1 days'),
                (3, 'Macbook Pro', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1250.00, 'https://img.example.com/products/3-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '2 days'),
                (4, 'PC Gamer', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1200.00, 'https://img.example.com/products/4-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '3 days'),
                (5, 'Rails for Dummies', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 100.99, 'https://img.example.com/products/5-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '4 days'),
                (6, 'PC Gamer Ex', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1350.00, 'https://img.example.com/products/6-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '5 days'),
                (7, 'PC Gamer X', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1350.00, 'https://img.example.com/products/7-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '6 days'),
                (8, 'PC Gamer Alfa', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1850.00, 'https://img.example.com/products/8-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '7 days'),
                (9, 'PC Gamer Tera', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1950.00, 'https://img.example.com/products/9-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '8 days'),
                (10, 'PC Gamer Y', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1700.00, 'https://img.example.com/products/10-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '9 days'),
                (11, 'PC Gamer Nitro', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1450.00, 'https://img.example.com/products/11-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '10 days'),
                (12, 'PC Gamer Card', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1850.00, 'https://img.example.com/products/12-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '11 days'),
                (13, 'PC Gamer Plus', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1350.00, 'https://img.example.com/products/13-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '12 days'),
                (14, 'PC Gamer Hera', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2250.00, 'https://img.example.com/products/14-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '13 days'),
                (15, 'PC Gamer Weed', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2200.00, 'https://img.example.com/products/15-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '14 days'),
                (16, 'PC Gamer Max', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2350.00, 'https://img.example.com/products/16-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '15 days'),
                (17, 'PC Gamer Turbo', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1280.00, 'https://img.example.com/products/17-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '16 days'),
                (18, 'PC Gamer Hot', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1450.00, 'https://img.example.com/products/18-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '17 days'),
                (19, 'PC Gamer Ez', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1750.00, 'https://img.example.com/products/19-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '18 days'),
                (20, 'PC Gamer Tr', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1650.00, 'https://img.example.com/products/20-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '19 days'),
                (21, 'PC Gamer Tx', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1680.00, 'https://img.example.com/products/21-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '20 days'),
                (22, 'PC Gamer Tu', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1850.00, 'https://img.example.com/products/22-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '21 days'),
                (23, 'PC Gamer Foo', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1550.00, 'https://img.example.com/products/23-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '22 days'),
                (24, 'PC Gamer Boo', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 1930.00, 'https://img.example.com/products/24-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '23 days'),
                (25, 'PC Gamer Min', 'Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.', 2225.00, 'https://img.example.com/products/25-big.jpg', TIMESTAMPTZ '2020-07-13 20:50:07+00' + INTERVAL '24 days')
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO product_categories (product_id, category_id, position)
            VALUES
                (1, 1, 0), (2, 2, 0), (3, 2, 0), (3, 3, 1), (4, 3, 0), (5, 1, 0),
                (6, 3, 0), (7, 3, 0), (8, 3, 0), (9, 3, 0), (10, 3, 0), (11, 3, 0),
                (12, 3, 0), (13, 3, 0), (14, 3, 0), (15, 3, 0), (16, 3, 0), (17, 3, 0),
                (18, 3, 0), (19, 3, 0), (20, 3, 0), (21, 3, 0), (22, 3, 0), (23, 3, 0),
                (24, 3, 0), (25, 3, 0)
            ON CONFLICT DO NOTHING
            "#,
        )
        .await?;

        // Placeholder hash: set a real password with PUT /users/{id}
        db.execute_unprepared(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, roles)
            VALUES
                (1, 'Alex', 'Brown', 'alex@gmail.com',
                 '$argon2id$v=19$m=19456,t=2,p=1$Y2F0YWxvZy1zZWVk$Xv8ZLPc9CeO8fcQ5PQGd5Te8NzTxFqjvsS0/W1eIQWY',
                 '["operator"]'::JSONB),
                (2, 'Maria', 'Green', 'maria@gmail.com',
                 '$argon2id$v=19$m=19456,t=2,p=1$Y2F0YWxvZy1zZWVk$Xv8ZLPc9CeO8fcQ5PQGd5Te8NzTxFqjvsS0/W1eIQWY',
                 '["operator", "admin"]'::JSONB)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .await?;

        // Explicit ids above bypass the sequences
        for table in ["categories", "products", "users"] {
            db.execute_unprepared(&format!(
                "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT COALESCE(MAX(id), 1) FROM {table}))"
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DELETE FROM product_categories WHERE product_id <= 25")
            .await?;
        db.execute_unprepared("DELETE FROM products WHERE id <= 25").await?;
        db.execute_unprepared("DELETE FROM categories WHERE id <= 3").await?;
        db.execute_unprepared("DELETE FROM users WHERE id <= 2").await?;

        Ok(())
    }
}
