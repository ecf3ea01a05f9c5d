
mod property_pairing;
