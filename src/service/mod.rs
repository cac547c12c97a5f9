pub mod seeder;

pub use seeder::Seeder;
