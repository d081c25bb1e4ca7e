// Diesel schema for SQLite.
// Tablas: molecules, simulations
use diesel::allow_tables_to_appear_in_same_query;
diesel::table! {
    molecules (id) {
        id -> Integer,
        smiles -> Text,
        name -> Nullable<Text>,
        molecular_weight -> Nullable<Double>,
        logp -> Nullable<Double>,
        h_bond_donors -> Nullable<Integer>,
        h_bond_acceptors -> Nullable<Integer>,
        admet_score -> Nullable<Double>,
        docking_score -> Nullable<Double>,
        description -> Nullable<Text>,
        status -> Text,
        created_at_ts -> BigInt,
    }
}
diesel::table! {
    simulations (id) {
        id -> Integer,
        target_protein -> Nullable<Text>,
        reference_drug -> Nullable<Text>,
        molecules_generated -> Nullable<Integer>,
        top_candidate_id -> Nullable<Integer>,
        created_at_ts -> BigInt,
    }
}
allow_tables_to_appear_in_same_query!(molecules, simulations);
