pub mod shared {
    pub mod core {
        pub mod clock;
        pub mod person_id;
    }
    pub mod infrastructure {
        pub mod attendance_store;
        pub mod directory;
    }
}

pub mod modules {
    pub mod attendance {
        pub mod core {
            pub mod events;
            pub mod evolve;
            pub mod partition;
            pub mod record;
            pub mod state;
        }
        pub mod use_cases {
            pub mod register_attendance {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod list_attendance {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod lookup_person {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod csv_report_exporter;
                pub mod report_exporter;
            }
        }
    }
}

pub mod shell;
