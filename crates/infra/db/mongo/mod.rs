pub mod mongo_connection;
