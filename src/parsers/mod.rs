pub mod tmx;
