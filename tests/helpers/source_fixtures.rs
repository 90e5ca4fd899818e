//! Reusable `.proto` sources.

pub const USER_PROTO: &str = r#"syntax = "proto3";

package pkg;

// A registered user.
message User {
  string name = 1;
  int64 id = 2;
}
"#;

pub const ORDER_PROTO: &str = r#"syntax = "proto3";

package pkg;

import "user.proto";

message Order {
  pkg.User buyer = 1;
  User seller = 2;
  repeated .pkg.User watchers = 3;
}
"#;

pub const SHADOWED_FLAGS: &str = r#"message A {
  message Flags {}
}
message B {
  message Flags {}
  Flags flags = 1;
}
"#;

pub const FULL_SERVICE: &str = r#"syntax = "proto3";

package shop.v1;

import public "common.proto";
import weak "legacy.proto";
import "money.proto";

option java_package = "com.example.shop";
option optimize_for = SPEED;

/* Checkout flow. */
service Checkout {
  option deprecated = true;

  rpc Start(StartRequest) returns (StartReply);
  rpc Stream(stream Item) returns (stream Receipt) {
    option (shop.v1.idempotent) = true;
  };
}

message StartRequest {
  map<string, Item> items = 1;
  oneof payment {
    string card = 2;
    string voucher = 3;
  }
  reserved 4, 15, 9 to 11;
  reserved "legacy", "old";
  extensions 100 to max;
}

message StartReply {}
message Item {}
message Receipt {}

enum Status {
  option allow_alias = true;
  STATUS_UNSPECIFIED = 0;
  STATUS_OK = 1 [deprecated = true];
  reserved 5 to 7;
}
"#;
